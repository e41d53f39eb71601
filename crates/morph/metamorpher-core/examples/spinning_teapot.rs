//! Spins a teapot-sized object through three poses and prints the morphed
//! transform at a fixed 60 Hz frame rate.
//!
//! Run with `RUST_LOG=debug cargo run --example spinning_teapot` to see
//! playback events.

use std::f32::consts::{FRAC_PI_2, PI};

use log::info;
use metamorpher_core::{
    MetaMorpher, MorphEvent, MorpherConfig, PlaybackMode, Ticker, Transform,
    TransformInterpolation,
};

const FRAME_MS: f64 = 1000.0 / 60.0;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut upside_down = Transform::IDENTITY;
    upside_down.rotate([0.0, 0.0, 1.0], PI);
    let mut turned = upside_down;
    turned.rotate([0.0, 1.0, 0.0], FRAC_PI_2);
    turned.translate([0.0, 0.5, 0.0]);

    let cfg = MorpherConfig {
        speed: 0.5,
        ..MorpherConfig::with_mode(PlaybackMode::PingPong)
    };
    let mut teapot = MetaMorpher::with_config(Transform::IDENTITY, TransformInterpolation, cfg)?;
    teapot.add(Transform::IDENTITY, 0.0)?;
    teapot.add(upside_down, 1000.0)?;
    teapot.add(turned, 2000.0)?;

    // The scene graph keeps this handle; the morpher writes through it.
    let node = teapot.object();

    // Drive the morpher directly for a few frames to read the tick reports.
    for frame in 0..30 {
        let report = teapot.on_tick(FRAME_MS)?;
        if let Some(MorphEvent::Wrapped { cycles }) = report.event {
            info!("teapot finished round trip #{cycles}");
        }
        if frame % 10 == 0 {
            println!(
                "frame {frame:>3} t={:>7.1} segment={} rotation={:?}",
                report.cursor,
                report.segment,
                node.read().rotation
            );
        }
    }

    // Then hand it to a ticker alongside anything else the host animates.
    let mut ticker = Ticker::new();
    ticker.attach(Box::new(teapot));
    for _ in 0..600 {
        ticker.tick(FRAME_MS)?;
    }
    let pose = node.snapshot();
    println!(
        "after {} ticker frames: translation={:?} rotation={:?}",
        ticker.frame(),
        pose.translation,
        pose.rotation
    );
    Ok(())
}
