/// The eight figures published in each bulletin, in log column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    MunicipalitiesAffected,
    PeopleInShelters,
    Displaced,
    Affected,
    Injured,
    Missing,
    Dead,
    Rescued,
}

impl Indicator {
    pub const ALL: [Indicator; 8] = [
        Indicator::MunicipalitiesAffected,
        Indicator::PeopleInShelters,
        Indicator::Displaced,
        Indicator::Affected,
        Indicator::Injured,
        Indicator::Missing,
        Indicator::Dead,
        Indicator::Rescued,
    ];

    /// Label as printed on the bulletin page (without the trailing colon).
    pub fn label(self) -> &'static str {
        match self {
            Indicator::MunicipalitiesAffected => "Municípios afetados",
            Indicator::PeopleInShelters => "Pessoas em abrigos",
            Indicator::Displaced => "Desalojados",
            Indicator::Affected => "Afetados",
            Indicator::Injured => "Feridos",
            Indicator::Missing => "Desaparecidos",
            Indicator::Dead => "Óbitos confirmados",
            Indicator::Rescued => "Pessoas resgatadas",
        }
    }

    /// Column name in the CSV log.
    pub fn column(self) -> &'static str {
        match self {
            Indicator::MunicipalitiesAffected => "Municipalities affected",
            Indicator::PeopleInShelters => "People in shelters",
            Indicator::Displaced => "Displaced",
            Indicator::Affected => "Affected",
            Indicator::Injured => "Injured",
            Indicator::Missing => "Missing",
            Indicator::Dead => "Dead",
            Indicator::Rescued => "Rescued",
        }
    }
}

// ── Tests ──
