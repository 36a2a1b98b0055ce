use std::error::Error;
use std::io::{stdout, Write};
use std::path::PathBuf;

use badge_core::Badge;
use bpaf::Bpaf;
use tracing::{debug, info};
use wang_protocol::{
    Animation, EncodedMessage, Encoder, GlyphRasterizer, LayoutMode, ProtocolProfile, Speed,
};

use crate::config::Config;
use crate::detection::{badge_kind, BadgeKind};
use crate::render::{SpleenRasterizer, TtfRasterizer};

mod config;
mod detection;
mod preview;
mod render;

#[derive(Clone, Debug, Bpaf)]
#[bpaf(options, version, descr(env!("CARGO_PKG_DESCRIPTION")))]
struct Cli {
    #[bpaf(external(badge_kind))]
    badge: BadgeKind,
    /// Scroll speed [1-8]
    #[bpaf(short, long, argument("N"))]
    speed: Option<Speed>,
    /// Animation type [0-11]
    #[bpaf(short, long, argument("N"))]
    animation: Option<Animation>,
    /// Blink the message
    #[bpaf(short, long)]
    blink: bool,
    /// Light the scrolling border
    #[bpaf(short('l'), long("scrolling-light"))]
    scrolling_light: bool,
    /// Render and send each character in its own cell instead of one continuous strip
    #[bpaf(long)]
    separate: bool,
    /// Protocol variant [english|localized]
    #[bpaf(short, long, argument("PROFILE"))]
    profile: Option<ProtocolProfile>,
    /// Brightness above which a pixel is lit [0.0-1.0]
    #[bpaf(short, long, argument("LEVEL"))]
    threshold: Option<f32>,
    /// TrueType font to render with, instead of the built-in bitmap font
    #[bpaf(short, long, argument("PATH"))]
    font: Option<PathBuf>,
    /// Write a png preview of the encoded bitmap
    #[bpaf(long, argument("PATH"))]
    preview: Option<PathBuf>,
    /// Delay between reports, e.g. 5ms
    #[bpaf(long, argument("DURATION"))]
    pacing: Option<humantime::Duration>,
    /// Encode only, do not send to the badge
    #[bpaf(long("dry-run"))]
    dry_run: bool,
    /// Config file to use instead of the default location
    #[bpaf(short, long, argument("PATH"))]
    config: Option<PathBuf>,
    /// Print debug logs
    #[bpaf(short, long)]
    verbose: bool,
    /// Text to display
    #[bpaf(positional("TEXT"))]
    text: String,
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Print the same summary the vendor tool reports before uploading
fn print_summary(message: &EncodedMessage, profile: &ProtocolProfile) {
    let plan = &message.plan;
    let packets = message.packets.len();
    let estimated = (packets * profile.max_payload).div_ceil(profile.geometry.bytes_per_cell());
    println!("string length: {}", plan.effective_length);
    if plan.mode == LayoutMode::Continuous {
        println!("half-width chars: {}", plan.half_width);
        println!("full-width chars: {}", plan.full_width);
    }
    println!("total packet count: {packets}");
    println!("total characters sent (est.): {estimated}");
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = cli().run();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_create()?,
    };

    // cli flags override the config file
    let mut options = config.display_options()?;
    if let Some(speed) = cli.speed {
        options.speed = speed;
    }
    if let Some(animation) = cli.animation {
        options.animation = animation;
    }
    options.blink |= cli.blink;
    options.scrolling_light |= cli.scrolling_light;
    if cli.separate {
        options.layout = LayoutMode::PerCharacter;
    }

    let mut profile = match cli.profile {
        Some(profile) => profile,
        None => config.profile()?,
    };
    if let Some(threshold) = cli.threshold {
        profile = profile.with_threshold(threshold)?;
    }
    debug!(?options, profile = profile.name, threshold = profile.threshold, "resolved options");

    let mut rasterizer: Box<dyn GlyphRasterizer> = match cli.font.or(config.render.font.clone()) {
        Some(path) => {
            let size = match options.layout {
                LayoutMode::Continuous => config.render.continuous_size,
                LayoutMode::PerCharacter => config.render.per_character_size,
            };
            Box::new(TtfRasterizer::from_path(&path, size)?)
        },
        None => Box::new(SpleenRasterizer::new(
            profile.width_accounting,
            profile.geometry.width,
        )),
    };

    let encoder = Encoder::new(profile)?;
    let message = encoder.encode(&cli.text, &options, rasterizer.as_mut())?;
    print_summary(&message, encoder.profile());

    if let Some(path) = &cli.preview {
        if message.packets.is_empty() {
            println!("nothing to preview for an empty message");
        } else {
            preview::save_preview(
                path,
                &message,
                encoder.profile().geometry,
                config.render.preview_scale,
            )?;
            println!("wrote preview to {}", path.display());
        }
    }

    if cli.dry_run {
        return Ok(());
    }

    let pacing = cli
        .pacing
        .map(Into::into)
        .unwrap_or(config.transport.pacing);
    let mut badge = cli.badge.as_badge()?;
    info!(badge = badge.info().name, "device found");

    badge.upload(&message.header, &message.packets, pacing, &mut |sent, total| {
        print!("\rsending packets ({sent}/{total}) ... ");
        let _ = stdout().flush();
    })?;
    println!("\nall packets sent");
    Ok(())
}

#[cfg(test)]
#[test]
fn cli_parses_display_flags() {
    let cli = cli()
        .run_inner(&["--speed", "3", "-a", "11", "--blink", "--separate", "hello"])
        .unwrap();
    assert_eq!(cli.speed.map(Speed::get), Some(3));
    assert_eq!(cli.animation.map(Animation::get), Some(11));
    assert!(cli.blink && cli.separate && !cli.scrolling_light);
    assert_eq!(cli.badge, BadgeKind::Auto);
    assert_eq!(cli.text, "hello");
}

#[cfg(test)]
#[test]
fn cli_rejects_out_of_range_speed() {
    assert!(cli().run_inner(&["--speed", "9", "hello"]).is_err());
}
