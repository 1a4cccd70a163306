/// Logical fields extracted from a location fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanonicalField {
    Location,
    Date,
    MinTemp,
    MaxTemp,
    Description,
}

/// Ordered aliases for one canonical field. All entries are JSON pointers
/// evaluated against the fragment, except `element_names`.
#[derive(Debug, Clone, Copy)]
pub struct FieldAliases {
    pub field: CanonicalField,
    /// Looked up on the fragment before its weather elements
    pub pointers: &'static [&'static str],
    /// Matched case-insensitively against each weather element's name
    pub element_names: &'static [&'static str],
    /// Looked up on the fragment after its weather elements
    pub fallback: &'static [&'static str],
}

/// Every key-name variant the normalizer knows about, across upstream API versions.
///
/// Bump `version` whenever an alias is added, removed or reordered so stored
/// rows can be traced back to the table that produced them.
#[derive(Debug, Clone, Copy)]
pub struct AliasTable {
    pub version: u32,
    pub fields: &'static [FieldAliases],
    /// Where the list of weather elements lives in a fragment
    pub element_list: &'static [&'static str],
    /// Relative to a weather element
    pub element_name: &'static [&'static str],
    /// Relative to a weather element
    pub element_value: &'static [&'static str],
    /// Relative to a weather element; any element carrying one dates the fragment
    pub element_time: &'static [&'static str],
    /// Where the precipitation block lives in a fragment
    pub precipitation_container: &'static [&'static str],
    /// Relative to a mapping entry whose value is an object
    pub precipitation_value: &'static [&'static str],
    /// Relative to a sequence entry
    pub reading_period: &'static [&'static str],
    /// Relative to a sequence entry
    pub reading_value: &'static [&'static str],
}

impl AliasTable {
    pub fn aliases_for(&self, field: CanonicalField) -> Option<&FieldAliases> {
        self.fields.iter().find(|aliases| aliases.field == field)
    }
}

impl Default for AliasTable {
    fn default() -> Self {
        DEFAULT_ALIASES
    }
}

pub const DEFAULT_ALIASES: AliasTable = AliasTable {
    version: 1,
    fields: &[
        FieldAliases {
            field: CanonicalField::Location,
            pointers: &[
                "/StationName",
                "/locationName",
                "/location",
                "/name",
                "/area",
                "/county",
                "/city",
            ],
            element_names: &[],
            fallback: &[],
        },
        FieldAliases {
            field: CanonicalField::Date,
            pointers: &[
                "/ObsTime/DateTime",
                "/time/0/startTime",
                "/time/0/dataTime",
                "/time/0/time",
            ],
            element_names: &[],
            fallback: &["/date", "/forecastDate", "/dataTime"],
        },
        FieldAliases {
            field: CanonicalField::MinTemp,
            pointers: &[
                "/MinT",
                "/minT",
                "/min_temp",
                "/TMin",
                "/MinTemperature",
                "/WeatherElement/DailyExtreme/DailyLow/TemperatureInfo/AirTemperature",
            ],
            element_names: &["MinT", "TMin", "MinTemperature", "min_temp"],
            fallback: &[],
        },
        FieldAliases {
            field: CanonicalField::MaxTemp,
            pointers: &[
                "/MaxT",
                "/maxT",
                "/max_temp",
                "/TMax",
                "/MaxTemperature",
                "/WeatherElement/DailyExtreme/DailyHigh/TemperatureInfo/AirTemperature",
            ],
            element_names: &["MaxT", "TMax", "MaxTemperature", "max_temp"],
            fallback: &[],
        },
        FieldAliases {
            field: CanonicalField::Description,
            pointers: &["/Wx", "/WeatherElement/Weather", "/description", "/weather"],
            element_names: &["Wx", "Weather", "WeatherDescription", "WxValue"],
            fallback: &["/wx", "/parameterName"],
        },
    ],
    element_list: &["/weatherElement"],
    element_name: &["/elementName", "/element", "/parameterName", "/name"],
    element_value: &[
        "/time/0/parameter/parameterName",
        "/time/0/parameter/parameterValue",
        "/time/0/elementValue/value",
        "/parameter",
        "/value",
        "/forecast",
    ],
    element_time: &["/time/0/startTime", "/time/0/dataTime"],
    precipitation_container: &["/RainfallElement", "/Rainfall", "/rainfall", "/precipitation"],
    precipitation_value: &[
        "/Precipitation",
        "/Precip",
        "/Value",
        "/precipitation",
        "/value",
    ],
    reading_period: &["/period", "/Period", "/name", "/label"],
    reading_value: &[
        "/value",
        "/Value",
        "/precipitation",
        "/Precipitation",
        "/Precip",
    ],
};
