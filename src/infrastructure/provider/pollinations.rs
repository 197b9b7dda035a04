use rand::Rng;

use crate::{
    constants::{DEFAULT_IMAGE_DIMENSION, SEED_UPPER_BOUND},
    entities::{generation::GenerationOptions, model::{ModelDescriptor, ProviderGeneration}},
    repositories::provider::ImageProvider,
};

pub const DEFAULT_BASE_URL: &str = "https://image.pollinations.ai/prompt";
pub const DEFAULT_MODEL: &str = "flux";

/// URL-addressed generator: the image lives at a deterministic URL built from the prompt
/// and parameters, so resolving a generation is pure string construction.
#[derive(Debug, Clone)]
pub struct PollinationsClient {
    base_url: String,
    default_model: String,
}

impl Default for PollinationsClient {
    fn default() -> Self {
        PollinationsClient::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

impl PollinationsClient {
    pub fn new(base_url: &str, default_model: &str) -> Self {
        PollinationsClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model: default_model.to_string(),
        }
    }

    pub fn build_url(&self, prompt: &str, model: &str, width: i32, height: i32, seed: i64) -> String {
        format!(
            "{}/{}?model={}&width={}&height={}&seed={}&nologo=true",
            self.base_url,
            urlencoding::encode(prompt),
            urlencoding::encode(model),
            width,
            height,
            seed
        )
    }
}

fn random_seed() -> i64 {
    rand::thread_rng().gen_range(0..SEED_UPPER_BOUND)
}

impl ImageProvider for PollinationsClient {
    fn request_generation(&self, prompt: &str, options: &GenerationOptions) -> ProviderGeneration {
        let model = options
            .model
            .clone()
            .unwrap_or_else(|| self.default_model.clone());
        let width = options.width.unwrap_or(DEFAULT_IMAGE_DIMENSION);
        let height = options.height.unwrap_or(DEFAULT_IMAGE_DIMENSION);
        let seed = options.seed.unwrap_or_else(random_seed);

        ProviderGeneration {
            resource_url: self.build_url(prompt, &model, width, height, seed),
            prompt: prompt.to_string(),
            model,
            width,
            height,
            seed,
        }
    }

    fn list_models(&self) -> Vec<ModelDescriptor> {
        vec![
            ModelDescriptor::new("flux", "Flux (Default)", "High quality, fast generation"),
            ModelDescriptor::new("flux-realism", "Flux Realism", "Photorealistic images"),
            ModelDescriptor::new("flux-anime", "Flux Anime", "Anime style images"),
            ModelDescriptor::new("flux-3d", "Flux 3D", "3D rendered style"),
        ]
    }
}
