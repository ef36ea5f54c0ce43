//! Field schema - the nine slots of a national ID card

/// A named slot of the identity record
///
/// The set is closed: every card carries exactly these nine fields. Variants
/// are declared in canonical display order, which is also their `Ord` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// Card number, e.g. `1-0234-0567`
    IdNumber,

    /// Holder's full name (no printed label, detected by shape)
    FullName,

    /// Holder's sex (no printed label, one of [`Sex`])
    Sex,

    /// Date of birth
    BirthDate,

    /// Place of birth
    BirthPlace,

    /// Father's name
    FatherName,

    /// Mother's name
    MotherName,

    /// Electoral address
    ElectoralAddress,

    /// Card expiration date
    ExpirationDate,
}

impl Field {
    /// Number of fields in the schema
    pub const COUNT: usize = 9;

    /// All fields in canonical order
    pub const ALL: [Field; Field::COUNT] = [
        Field::IdNumber,
        Field::FullName,
        Field::Sex,
        Field::BirthDate,
        Field::BirthPlace,
        Field::FatherName,
        Field::MotherName,
        Field::ElectoralAddress,
        Field::ExpirationDate,
    ];

    /// Get the field key (camelCase, stable across versions)
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::IdNumber => "idNumber",
            Field::FullName => "fullName",
            Field::Sex => "sex",
            Field::BirthDate => "birthDate",
            Field::BirthPlace => "birthPlace",
            Field::FatherName => "fatherName",
            Field::MotherName => "motherName",
            Field::ElectoralAddress => "electoralAddress",
            Field::ExpirationDate => "expirationDate",
        }
    }

    /// Get the Spanish display name shown next to the value
    pub fn display_name(&self) -> &'static str {
        match self {
            Field::IdNumber => "Número de Cédula",
            Field::FullName => "Nombre",
            Field::Sex => "Sexo",
            Field::BirthDate => "Fecha de Nacimiento",
            Field::BirthPlace => "Lugar de Nacimiento",
            Field::FatherName => "Nombre del Padre",
            Field::MotherName => "Nombre de la Madre",
            Field::ElectoralAddress => "Domicilio Electoral",
            Field::ExpirationDate => "Vencimiento",
        }
    }

    /// Get the label printed on the card before the value, if any
    ///
    /// `FullName` and `Sex` are printed without a label.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Field::FullName | Field::Sex => None,
            other => Some(other.display_name()),
        }
    }

    /// Parse a field from its key (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid field: {}", s))
    }
}

/// Enumerated values accepted for [`Field::Sex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    /// Printed as `MASCULINO`
    Masculino,

    /// Printed as `FEMENINO`
    Femenino,
}

impl Sex {
    /// Get the value as printed on the card
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Masculino => "MASCULINO",
            Sex::Femenino => "FEMENINO",
        }
    }

    /// Parse an exact value, ignoring case. Partial words do not match.
    pub fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case(Sex::Masculino.as_str()) {
            Some(Sex::Masculino)
        } else if s.eq_ignore_ascii_case(Sex::Femenino.as_str()) {
            Some(Sex::Femenino)
        } else {
            None
        }
    }
}

impl std::str::FromStr for Sex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid sex: {}", s))
    }
}
