use base64::{engine::general_purpose::STANDARD as BASE64_STANDARD, Engine};
use dotenvy::dotenv;
use marketgenius_sdk::{google::GoogleImageModel, AspectRatio, ImageGenerationInput, ImageModel};
use std::fs;

mod common;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let model = GoogleImageModel::new("imagen-4.0-generate-001", common::google_options());

    let response = model
        .generate_images(ImageGenerationInput {
            prompt: "A sunset over the ocean, photographed for a travel blog header".to_string(),
            number_of_images: 1,
            aspect_ratio: AspectRatio::Landscape,
            output_mime_type: "image/png".to_string(),
        })
        .await
        .expect("generate_images failed");

    for (index, image) in response.images.iter().enumerate() {
        let ext = image.mime_type.split('/').nth(1).unwrap_or("png");
        let file_name = format!("sunset-{index}.{ext}");

        let image_bytes = BASE64_STANDARD
            .decode(&image.image_data)
            .expect("invalid base64 image data");

        fs::write(&file_name, image_bytes).expect("failed to write image file");
        println!("Saved image to {file_name}");
    }
}
