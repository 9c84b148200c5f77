use std::{
    fs::File,
    io::{self, Read},
};

use camfb::{
    capture::RawFrameCapturer,
    codecs::setup_decoder,
    config::{Resolution, RunConfig},
    format::{ColorMode, PixelFormat},
    pipeline::StreamingLoop,
    render::{fbdev::FramebufferDevice, Surface, SurfaceRenderer},
    transmission::TeeSender,
    types::FrameData,
};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[clap(version, about = "Display a raw video stream read from standard input on a framebuffer")]
struct Options {
    /// Video size: 640*480, 320*240 or any W*H
    #[clap(short = 'w', long = "size", default_value = "640*480")]
    size: Resolution,

    /// Show colored image (default, overrides --monochrome)
    #[clap(short, long)]
    color: bool,

    /// Show the luma plane only
    #[clap(short, long)]
    monochrome: bool,

    /// Chain the incoming data to standard output
    #[clap(short = 'o', long = "output")]
    output: bool,

    /// Input pixel format: yuv420p, rgb565, rgb32, yuv422 or raw12 (only yuv420p is decoded)
    #[clap(short, long, default_value = "yuv420p")]
    format: PixelFormat,

    /// Framebuffer device to draw on
    #[clap(long, default_value = "/dev/fb0")]
    device: String,

    /// Read frames from a file or named pipe instead of standard input
    #[clap(long)]
    input: Option<String>,

    /// Fill a blue rectangle on the screen and exit
    #[clap(long)]
    test_pattern: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = Options::parse();

    let color_mode = match (options.color, options.monochrome) {
        (false, true) => ColorMode::Monochrome,
        _ => ColorMode::Color,
    };

    let config = RunConfig::new(options.size, options.format)
        .color_mode(color_mode)
        .tee(options.output)
        .validate()?;
    info!("window size {}*{}", config.output_width, config.output_height);

    let device = FramebufferDevice::open(&options.device)?;
    let descriptor = device.descriptor()?;
    let mut surface = Surface::new(descriptor, device.map()?)?;

    if options.test_pattern {
        let blue = descriptor.channel_layout.pack(0, 0, 0xFF);
        surface.rect_fill(100, 200, 300, 150, blue);
        return Ok(());
    }

    config.check_fits(descriptor.width, descriptor.height)?;
    let renderer = SurfaceRenderer::new(surface, setup_decoder(&config)?);

    let input: Box<dyn Read> = match &options.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin().lock()),
    };

    let frame_size = config.frame_size();
    let mut pipeline = StreamingLoop::new(RawFrameCapturer::new(input, frame_size))
        .seed(FrameData::with_capacity(frame_size))
        .tag(device.path());

    if config.tee_to_secondary_sink {
        pipeline = pipeline.link(TeeSender::new(io::stdout().lock()));
    }

    let stats = pipeline.link(renderer).run();
    info!(
        "Displayed {} frames ({} dropped)",
        stats.frames - stats.dropped_frames,
        stats.dropped_frames
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use camfb::{config::Resolution, format::PixelFormat};
    use clap::{CommandFactory, Parser};

    use super::Options;

    #[test]
    fn command_line_is_consistent() {
        Options::command().debug_assert();
    }

    #[test]
    fn every_option_is_documented() {
        let command = Options::command();

        for arg in command.get_arguments() {
            assert!(arg.get_help().is_some(), "--{} has no help text", arg.get_id());
        }
    }

    #[test]
    fn flags_parse_into_options() {
        let options =
            Options::try_parse_from(["camfb", "-w", "320*240", "-m", "-o", "--format", "YUV420P"])
                .unwrap();

        assert_eq!(options.size, Resolution::QVGA);
        assert_eq!(options.format, PixelFormat::Yuv420p);
        assert_eq!(options.device, "/dev/fb0");
        assert!(options.monochrome && options.output && !options.test_pattern);
    }
}
