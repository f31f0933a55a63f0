//! Command-line interface definition

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "relief",
    version,
    about = "Convert a grayscale heightmap into an error-bounded triangle mesh"
)]
pub struct Args {
    /// Requested size of the mesh in the X axis
    #[arg(short = 'x', long)]
    pub xsize: f32,

    /// Requested size of the mesh in the Y axis
    #[arg(short = 'y', long)]
    pub ysize: f32,

    /// Z scale relative to X and Y
    #[arg(short = 'z', long)]
    pub zscale: f32,

    /// Maximum triangulation error
    #[arg(short = 'e', long, default_value_t = 0.001)]
    pub error: f32,

    /// Maximum number of triangles (0 = unbounded)
    #[arg(short = 't', long, default_value_t = 0)]
    pub triangles: usize,

    /// Maximum number of vertices (0 = unbounded)
    #[arg(short = 'p', long, default_value_t = 0)]
    pub points: usize,

    /// Solid base height (0 = no base)
    #[arg(short = 'b', long, default_value_t = 0.0)]
    pub base: f32,

    /// Auto level input to full grayscale range
    #[arg(long)]
    pub level: bool,

    /// Invert heightmap
    #[arg(long)]
    pub invert: bool,

    /// Gaussian blur sigma (0 = no blur)
    #[arg(long, default_value_t = 0)]
    pub blur: u32,

    /// Gamma curve exponent (0 = no gamma curve)
    #[arg(long, default_value_t = 0.0)]
    pub gamma: f32,

    /// Border size in pixels
    #[arg(long, default_value_t = 0)]
    pub border_size: usize,

    /// Border Z height
    #[arg(long, default_value_t = 1.0)]
    pub border_height: f32,

    /// Path to write the normal map PNG
    #[arg(long)]
    pub normal_map: Option<PathBuf>,

    /// Path to write the hillshade PNG
    #[arg(long)]
    pub shade_path: Option<PathBuf>,

    /// Hillshade light altitude in degrees
    #[arg(long, default_value_t = 45.0)]
    pub shade_alt: f32,

    /// Hillshade light azimuth in degrees
    #[arg(long, default_value_t = 0.0)]
    pub shade_az: f32,

    /// Suppress console output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Input heightmap image
    pub infile: PathBuf,

    /// Output mesh file (.stl or .obj, case-insensitive)
    pub outfile: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_minimal_invocation() {
        let args =
            Args::parse_from(["relief", "-x", "100", "-y", "100", "-z", "20", "in.png", "out.stl"]);
        assert_eq!(args.xsize, 100.0);
        assert_eq!(args.error, 0.001);
        assert_eq!(args.triangles, 0);
        assert_eq!(args.outfile.unwrap().to_str().unwrap(), "out.stl");
    }

    #[test]
    fn test_parse_long_flags() {
        let args = Args::parse_from([
            "relief",
            "--xsize=10",
            "--ysize=10",
            "--zscale=2",
            "--border-size=4",
            "--normal-map=n.png",
            "--quiet",
            "in.png",
        ]);
        assert_eq!(args.border_size, 4);
        assert!(args.quiet);
        assert!(args.outfile.is_none());
        assert!(args.normal_map.is_some());
    }
}
