use serde::{Deserialize, Serialize};

/// Body of the POST sent to the query API.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Query {
    pub start: String,
    pub filter: Filter,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Filter {
    pub vsn: String,
    pub task: String,
}
