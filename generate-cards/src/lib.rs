pub mod svg;

use anyhow::Context;
use card_utils::CardFace;
use std::path::{Path, PathBuf};

/// Where assets go when neither an argument nor `CARD_SVG_OUT_DIR` says otherwise.
pub const DEFAULT_OUT_DIR: &str = "public/cards";

pub const OUT_DIR_ENV: &str = "CARD_SVG_OUT_DIR";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardAsset {
    pub file_name: String,
    pub svg: String,
}

#[derive(Debug)]
pub struct GenerationReport {
    pub out_dir: PathBuf,
    pub files_written: usize,
}

/// Every file to write: each face under both its short and long name, then the back.
pub fn asset_plan() -> Vec<CardAsset> {
    let mut assets = Vec::new();
    for face in CardFace::all_faces() {
        let CardFace::Face { rank, suit } = face else {
            continue;
        };
        let svg = svg::card_svg(rank, suit);
        assets.push(CardAsset {
            file_name: face.short_file_name(),
            svg: svg.clone(),
        });
        assets.push(CardAsset {
            file_name: face.long_file_name(),
            svg,
        });
    }
    assets.push(CardAsset {
        file_name: CardFace::Back.short_file_name(),
        svg: svg::back_svg(),
    });
    assets
}

/// Picks the output directory: explicit argument, then the `CARD_SVG_OUT_DIR` value, then
/// the default. A blank value counts as unset at every step.
pub fn resolve_out_dir(arg: Option<String>, env_value: Option<String>) -> PathBuf {
    let non_blank = |dir: &String| !dir.trim().is_empty();
    arg.filter(non_blank)
        .or_else(|| env_value.filter(non_blank))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
}

/// Writes every planned asset into `out_dir`, creating it if needed and overwriting
/// whatever is already there.
pub fn generate(out_dir: &Path) -> anyhow::Result<GenerationReport> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let plan = asset_plan();
    for asset in &plan {
        let path = out_dir.join(&asset.file_name);
        std::fs::write(&path, &asset.svg)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::debug!("Wrote {}", path.display());
    }

    log::info!("Generated playing card SVGs in {}", out_dir.display());
    Ok(GenerationReport {
        out_dir: out_dir.to_path_buf(),
        files_written: plan.len(),
    })
}
