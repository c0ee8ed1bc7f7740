use anyhow::{Context, Result, bail};
use card_editor::Quad;
use card_layout::LayoutOptions;
use card_scan::{Detection, WarpParams};
use clap::{Parser, Subcommand};
use image::DynamicImage;
use std::path::{Path, PathBuf};
use std::sync::Arc;

mod logger;

#[derive(Parser)]
#[command(name = "cardt", about = "ID card scanning CLI", version)]
struct Cli {
    /// Print progress and debug messages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Locate the card outline in a photo and print it as JSON
    Detect {
        /// Input photo
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Correct the perspective of a card photo
    Warp {
        /// Input photo
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Corners as x,y,x,y,x,y,x,y in image pixels (detected when omitted)
        #[arg(long, value_parser = parse_quad, allow_hyphen_values = true)]
        quad: Option<Quad>,

        /// Counter-clockwise rotation in degrees
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        rotate: f32,

        /// Padding around the card in pixels
        #[arg(long, default_value = "20")]
        pad: u32,

        /// Skip the transparent-padding refinement and write RGB
        #[arg(long)]
        no_refine: bool,
    },

    /// Detect and correct both sides, then lay them out on a PDF page
    Compose {
        /// Front side photo
        #[arg(long)]
        front: PathBuf,

        /// Back side photo
        #[arg(long)]
        back: PathBuf,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Layout settings JSON file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Also write a PNG preview of the page
        #[arg(long)]
        preview: Option<PathBuf>,
    },
}

/// Preview raster width used by `compose --preview`
const PREVIEW_WIDTH_PX: u32 = 840;

fn parse_quad(value: &str) -> Result<Quad> {
    let numbers = value
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .with_context(|| format!("'{}' is not a number", part.trim()))
        })
        .collect::<Result<Vec<_>>>()?;

    if numbers.len() != 8 {
        bail!("expected 8 comma-separated numbers, got {}", numbers.len());
    }

    let pairs: Vec<[f64; 2]> = numbers.chunks_exact(2).map(|c| [c[0], c[1]]).collect();
    Ok(Quad::from_pairs(&pairs)?)
}

async fn load_image(path: &Path) -> Result<DynamicImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let image = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes))
        .await?
        .with_context(|| format!("Failed to decode {}", path.display()))?;
    Ok(image)
}

async fn detect_image(image: Arc<DynamicImage>) -> Result<Detection> {
    Ok(tokio::task::spawn_blocking(move || card_scan::detect_in_image(&image)).await?)
}

/// Detect (unless a quad is given) and warp one photo.
async fn correct_side(
    path: &Path,
    quad: Option<Quad>,
    params: WarpParams,
) -> Result<DynamicImage> {
    let image = Arc::new(load_image(path).await?);

    let quad = match quad {
        Some(quad) => quad,
        None => {
            let detection = detect_image(Arc::clone(&image)).await?;
            if !detection.found {
                log::warn!(
                    "{}: no card outline found, using the default box",
                    path.display()
                );
            }
            detection.quad
        }
    };

    let card = tokio::task::spawn_blocking(move || card_scan::warp_card(&image, &quad, &params))
        .await??;
    Ok(card)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    match cli.command {
        Commands::Detect { input } => {
            let image = Arc::new(load_image(&input).await?);
            let detection = detect_image(image).await?;
            println!("{}", serde_json::to_string_pretty(&detection)?);
        }

        Commands::Warp {
            input,
            output,
            quad,
            rotate,
            pad,
            no_refine,
        } => {
            let params = WarpParams {
                rotation_degrees: rotate,
                padding_px: pad,
                refine: !no_refine,
            };
            let card = correct_side(&input, quad, params).await?;
            let png = card_scan::encode_png(&card)?;
            tokio::fs::write(&output, png)
                .await
                .with_context(|| format!("Failed to write {}", output.display()))?;
            println!(
                "Corrected {}x{} card → {}",
                card.width(),
                card.height(),
                output.display()
            );
        }

        Commands::Compose {
            front,
            back,
            output,
            config,
            preview,
        } => {
            let options = match config {
                Some(path) => LayoutOptions::load(&path)
                    .await
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => LayoutOptions::default(),
            };

            let params = WarpParams::default();
            let (front, back) = tokio::try_join!(
                correct_side(&front, None, params),
                correct_side(&back, None, params)
            )?;
            let (front, back) = (Arc::new(front), Arc::new(back));

            if let Some(preview_path) = preview {
                let page = card_layout::preview(
                    Some(Arc::clone(&front)),
                    Some(Arc::clone(&back)),
                    PREVIEW_WIDTH_PX,
                    &options,
                )
                .await?;
                let png = card_scan::encode_png(&DynamicImage::ImageRgba8(page))?;
                tokio::fs::write(&preview_path, png)
                    .await
                    .with_context(|| format!("Failed to write {}", preview_path.display()))?;
                println!("Preview → {}", preview_path.display());
            }

            card_layout::write_pdf(front, back, &options, &output).await?;
            println!("{}", output.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_eight_numbers_into_a_quad() {
        let quad = parse_quad("10,20, 110,20,110.5,80,10,80").unwrap();
        assert_eq!(
            quad.to_pairs(),
            [[10.0, 20.0], [110.0, 20.0], [110.5, 80.0], [10.0, 80.0]]
        );
    }

    #[test]
    fn accepts_negative_coordinates() {
        let quad = parse_quad("-5,-5,100,0,100,50,0,50").unwrap();
        assert_eq!(quad.to_pairs()[0], [-5.0, -5.0]);
    }

    #[test]
    fn rejects_wrong_count() {
        let err = parse_quad("1,2,3,4,5,6").unwrap_err();
        assert!(err.to_string().contains("got 6"));
    }

    #[test]
    fn rejects_non_numbers() {
        assert!(parse_quad("1,2,3,4,5,6,7,x").is_err());
        assert!(parse_quad("1,2,3,4,5,6,7,inf").is_err());
    }

    #[test]
    fn cli_accepts_warp_arguments() {
        let cli = Cli::try_parse_from([
            "cardt", "warp", "-i", "in.jpg", "-o", "out.png", "--quad", "0,0,10,0,10,5,0,5",
            "--rotate", "-90", "--no-refine",
        ])
        .unwrap();
        match cli.command {
            Commands::Warp {
                quad,
                rotate,
                no_refine,
                pad,
                ..
            } => {
                assert!(quad.is_some());
                assert_eq!(rotate, -90.0);
                assert_eq!(pad, 20);
                assert!(no_refine);
            }
            _ => panic!("expected warp"),
        }
    }
}
