use crate::entities::{generation::GenerationOptions, model::{ModelDescriptor, ProviderGeneration}};

/// A text-to-image service addressed by URL. Resolving a generation performs no I/O.
pub trait ImageProvider: Send + Sync {
    fn request_generation(&self, prompt: &str, options: &GenerationOptions) -> ProviderGeneration;

    fn list_models(&self) -> Vec<ModelDescriptor>;
}
