use serde_json::Value;

static MISSING_FRAGMENT: Value = Value::Null;

/// Known upstream payload layouts, tried in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// File API download: `cwaopendata.dataset.Station`
    CwaOpenDataStation,
    /// REST observation API: `records.Station`
    RecordsStation,
    /// REST forecast API: `records.location`, each with nested weather elements
    RecordsLocation,
    /// Township forecast API: `records.locations[].location`
    RecordsLocations,
    RecordsList,
    TopLevelLocation,
    TopLevelLocations,
    GeoJsonFeatures,
    BareList,
}

impl ResponseShape {
    pub const ALL: [ResponseShape; 9] = [
        ResponseShape::CwaOpenDataStation,
        ResponseShape::RecordsStation,
        ResponseShape::RecordsLocation,
        ResponseShape::RecordsLocations,
        ResponseShape::RecordsList,
        ResponseShape::TopLevelLocation,
        ResponseShape::TopLevelLocations,
        ResponseShape::GeoJsonFeatures,
        ResponseShape::BareList,
    ];

    /// Human readable path to the fragment list.
    pub fn path(&self) -> &'static str {
        match self {
            ResponseShape::CwaOpenDataStation => "cwaopendata.dataset.Station",
            ResponseShape::RecordsStation => "records.Station",
            ResponseShape::RecordsLocation => "records.location",
            ResponseShape::RecordsLocations => "records.locations[].location",
            ResponseShape::RecordsList => "records[]",
            ResponseShape::TopLevelLocation => "location",
            ResponseShape::TopLevelLocations => "locations",
            ResponseShape::GeoJsonFeatures => "features[].properties",
            ResponseShape::BareList => "[]",
        }
    }

    /// Returns the per-location fragments when the payload has this shape.
    /// An empty list still counts as a match.
    pub fn locate<'a>(&self, payload: &'a Value) -> Option<Vec<&'a Value>> {
        let as_list = |pointer: &str| {
            payload
                .pointer(pointer)
                .and_then(Value::as_array)
                .map(|items| items.iter().collect::<Vec<_>>())
        };

        match self {
            ResponseShape::CwaOpenDataStation => as_list("/cwaopendata/dataset/Station"),
            ResponseShape::RecordsStation => as_list("/records/Station"),
            ResponseShape::RecordsLocation => as_list("/records/location"),
            ResponseShape::RecordsLocations => {
                let groups = payload.pointer("/records/locations")?.as_array()?;
                Some(
                    groups
                        .iter()
                        .filter_map(|group| group.get("location").and_then(Value::as_array))
                        .flatten()
                        .collect(),
                )
            }
            ResponseShape::RecordsList => as_list("/records"),
            ResponseShape::TopLevelLocation => as_list("/location"),
            ResponseShape::TopLevelLocations => as_list("/locations"),
            ResponseShape::GeoJsonFeatures => {
                let features = payload.get("features")?.as_array()?;
                Some(
                    features
                        .iter()
                        .map(|feature| feature.get("properties").unwrap_or(&MISSING_FRAGMENT))
                        .collect(),
                )
            }
            ResponseShape::BareList => payload.as_array().map(|items| items.iter().collect()),
        }
    }
}

impl ResponseShape {
    /// Positions of `records.locations` groups that carry no `location` list.
    /// They contribute no fragments; other shapes have no groups.
    pub fn ignored_groups(&self, payload: &Value) -> Vec<usize> {
        if *self != ResponseShape::RecordsLocations {
            return vec![];
        }
        payload
            .pointer("/records/locations")
            .and_then(Value::as_array)
            .map(|groups| {
                groups
                    .iter()
                    .enumerate()
                    .filter(|(_, group)| group.get("location").and_then(Value::as_array).is_none())
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for ResponseShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}
