use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use log::info;
use panoptes_core::CatalogConfig;
use panoptes_cv::{render_catalog, FusionConfig, Panorama, Pipeline};

mod cli;
mod manifest;

use cli::{Args, Command};
use manifest::{DetectionRecord, ReportEntry, ViewRecord};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    match Args::parse().command {
        Command::Views {
            panorama,
            out,
            yaws,
            pitches,
            fov,
            width,
            height,
        } => {
            let catalog = CatalogConfig {
                yaws,
                pitches,
                fov,
                output_size: (width, height),
            };
            write_views(&panorama, &out, &catalog)
        }
        Command::Count {
            panorama,
            detections,
            labels,
            iou,
        } => count(&panorama, &detections, labels.as_deref(), iou),
    }
}

fn write_views(
    panorama: &Path,
    out: &Path,
    catalog: &CatalogConfig,
) -> anyhow::Result<()> {
    catalog.validate()?;
    let pano = Panorama::open(panorama)
        .with_context(|| format!("failed to open panorama {panorama:?}"))?;
    let views = render_catalog(&pano, &catalog.specs())?;

    fs::create_dir_all(out).with_context(|| format!("failed to create {out:?}"))?;
    let mut records = Vec::with_capacity(views.len());
    for (idx, view) in views.iter().enumerate() {
        let filename = format!("view_{idx:03}.png");
        view.image
            .save(out.join(&filename))
            .with_context(|| format!("failed to write {filename}"))?;
        records.push(ViewRecord {
            filename,
            yaw: view.spec.yaw,
            pitch: view.spec.pitch,
            fov: view.spec.fov,
            width: view.spec.width,
            height: view.spec.height,
        });
    }
    fs::write(
        out.join("metadata.json"),
        serde_json::to_string_pretty(&records)?,
    )
    .context("failed to write metadata.json")?;

    info!("wrote {} views to {:?}", records.len(), out);
    Ok(())
}

fn count(
    panorama: &Path,
    detections: &Path,
    labels: Option<&Path>,
    iou: f64,
) -> anyhow::Result<()> {
    let pano = Panorama::open(panorama)
        .with_context(|| format!("failed to open panorama {panorama:?}"))?;
    let text = fs::read_to_string(detections)
        .with_context(|| format!("failed to read detection manifest {detections:?}"))?;
    let records: Vec<DetectionRecord> =
        serde_json::from_str(&text).context("malformed detection manifest")?;
    let views: Vec<_> = records
        .into_iter()
        .map(DetectionRecord::into_view_detections)
        .collect();

    let config = FusionConfig {
        iou_threshold: iou,
        ..FusionConfig::default()
    };
    let pipeline = Pipeline::new(CatalogConfig::default(), config);
    let counts = pipeline.run_mapped(&pano, &views, None)?;

    let names = load_labels(labels)?;
    let report: BTreeMap<String, ReportEntry> = counts
        .into_iter()
        .map(|(class_id, count)| {
            let name = names
                .get(&class_id)
                .cloned()
                .unwrap_or_else(|| class_id.to_string());
            (class_id.to_string(), ReportEntry { name, count })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_labels(path: Option<&Path>) -> anyhow::Result<BTreeMap<u32, String>> {
    let Some(path) = path else {
        return Ok(BTreeMap::new());
    };
    let text =
        fs::read_to_string(path).with_context(|| format!("failed to read label table {path:?}"))?;
    serde_json::from_str(&text).context("malformed label table")
}
