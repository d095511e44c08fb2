// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Subcommand implementations.

use std::path::Path;

use anyhow::{bail, Context, Result};
use comfy_table::{presets::UTF8_FULL, Table};
use physim_core::wire::{inspect, words_to_bytes, SceneSummary};
use physim_core::{demo, Quat, Scene, SceneConfig, Vec3};
use tracing::info;

use crate::cli::{Cli, Command};
use crate::io::{read_words, scene_config, write_words};

pub fn run(cli: Cli) -> Result<()> {
    let config_dir = cli.config_dir.as_deref();
    match cli.command {
        Command::Demo { out, count } => demo_cmd(&out, count),
        Command::Inspect { file, json } => inspect_cmd(&file, json),
        Command::Roundtrip { file } => roundtrip_cmd(&file, scene_config(config_dir)?),
        Command::Tick {
            file,
            delta,
            steps,
            out,
        } => tick_cmd(&file, delta, steps, out.as_deref(), scene_config(config_dir)?),
    }
}

fn demo_cmd(out: &Path, count: usize) -> Result<()> {
    let words = demo::triangle_scene(count)
        .drop_all_data()
        .context("failed to encode demo scene")?;
    write_words(out, &words)?;
    println!("wrote {count} objects ({} words) to {}", words.len(), out.display());
    Ok(())
}

fn inspect_cmd(file: &Path, json: bool) -> Result<()> {
    let words = read_words(file)?;
    let summary = inspect(&words).with_context(|| format!("{} is malformed", file.display()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary_table(&summary));
        println!("{} objects, {} words", summary.objects.len(), summary.total_words);
    }
    Ok(())
}

fn fmt_vec3(v: Vec3) -> String {
    format!("({}, {}, {})", v.x, v.y, v.z)
}

fn fmt_quat(q: Quat) -> String {
    format!("({}, {}, {}, {})", q.a, q.i, q.j, q.k)
}

fn summary_table(summary: &SceneSummary) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "#",
        "offset",
        "words",
        "pivot",
        "rotation",
        "mesh v/t",
        "collider v/t",
    ]);
    for o in &summary.objects {
        table.add_row(vec![
            o.index.to_string(),
            o.offset.to_string(),
            o.words.to_string(),
            fmt_vec3(o.pivot),
            fmt_quat(o.rotation),
            format!("{}/{}", o.mesh_vertices, o.mesh_triangles),
            format!("{}/{}", o.collider_vertices, o.collider_triangles),
        ]);
    }
    table
}

fn roundtrip_cmd(file: &Path, config: SceneConfig) -> Result<()> {
    let words = read_words(file)?;
    let mut scene = Scene::with_config(config);
    let count = scene
        .set_all_data(&words)
        .with_context(|| format!("failed to decode {}", file.display()))?;
    let again = scene.drop_all_data().context("failed to re-encode")?;

    let before = blake3::hash(words_to_bytes(&words));
    let after = blake3::hash(words_to_bytes(&again));
    println!("objects: {count}");
    println!("input:   {} ({} words)", before.to_hex(), words.len());
    println!("output:  {} ({} words)", after.to_hex(), again.len());
    if before != after {
        bail!("roundtrip changed the buffer");
    }
    println!("identical");
    Ok(())
}

fn tick_cmd(
    file: &Path,
    delta: f64,
    steps: u32,
    out: Option<&Path>,
    config: SceneConfig,
) -> Result<()> {
    let words = read_words(file)?;
    let mut scene = Scene::with_config(config);
    scene
        .init_all_data(&words)
        .with_context(|| format!("failed to decode {}", file.display()))?;
    for step in 0..steps {
        let ticked = scene.physics_tick(delta);
        info!(step, ticked, delta, "tick");
    }
    println!("ticked {} objects x {steps} steps (delta {delta})", scene.len());
    if let Some(out) = out {
        let encoded = scene.drop_all_data().context("failed to encode ticked scene")?;
        write_words(out, &encoded)?;
        println!("wrote {} words to {}", encoded.len(), out.display());
    }
    Ok(())
}
