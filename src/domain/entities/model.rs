use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl ModelDescriptor {
    pub fn new(id: &str, name: &str, description: &str) -> Self {
        ModelDescriptor {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
        }
    }
}

/// What the provider hands back before any bytes are fetched.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderGeneration {
    pub resource_url: String,
    pub prompt: String,
    pub model: String,
    pub width: i32,
    pub height: i32,
    pub seed: i64,
}
