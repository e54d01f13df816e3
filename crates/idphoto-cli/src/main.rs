use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use idphoto_sheet::{
    CropBox, CropProvider, Orientation, PageSize, PhotoSize, Session, SheetOptions,
    SheetStatistics, calculate_statistics, decode_upload, load_upload, save_sheet,
};
use std::path::PathBuf;

mod logger;

#[derive(Parser)]
#[command(name = "idphoto", about = "ID photo print sheet tool", version)]
struct Cli {
    /// Log progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop a photo and tile it onto a printable JPEG sheet
    Sheet {
        /// Input photo (JPEG, PNG, HEIC, ...)
        #[arg(short, long)]
        input: PathBuf,

        /// Output JPEG file (defaults to the standard sheet name)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Rotate the photo clockwise by this many degrees
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        rotate: f32,

        /// Crop selection in rotated-photo pixels: x,y,width,height
        /// (height is adjusted to the photo aspect ratio)
        #[arg(long, value_parser = parse_crop)]
        crop: Option<CropBox>,

        /// Leave out the dashed cutting guides
        #[arg(long)]
        no_guides: bool,

        /// JPEG quality (1-100)
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
        quality: Option<u8>,

        /// Show statistics only, don't render a sheet
        #[arg(long)]
        stats_only: bool,
    },

    /// Show how many photos fit on one sheet
    Stats {
        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// List the available paper and photo sizes
    Sizes,
}

/// Paper, photo and spacing settings shared by commands
#[derive(Args)]
struct LayoutArgs {
    /// Load base settings from a JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Photo paper size
    #[arg(long, value_enum)]
    paper: Option<PaperArg>,

    /// ID photo size
    #[arg(long, value_enum)]
    photo: Option<PhotoArg>,

    /// Custom photo size in millimeters, e.g. 33x48
    #[arg(long, value_parser = parse_photo_mm, conflicts_with = "photo")]
    photo_mm: Option<PhotoSize>,

    /// Paper orientation
    #[arg(long, value_enum)]
    orientation: Option<OrientationArg>,

    /// Distance from the paper edge to the photos in mm
    #[arg(long)]
    margin_mm: Option<f32>,

    /// Distance between photos in mm
    #[arg(long)]
    gap_mm: Option<f32>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    #[value(name = "4x6")]
    FourBySix,
    #[value(name = "3x5")]
    ThreeByFive,
}

#[derive(Clone, Copy, ValueEnum)]
enum PhotoArg {
    #[value(name = "3.5x4.5", alias = "passport")]
    Passport,
    #[value(name = "3x4")]
    ThreeByFour,
    #[value(name = "5x5")]
    Square,
    #[value(name = "5x7")]
    FiveBySeven,
}

#[derive(Clone, Copy, ValueEnum)]
enum OrientationArg {
    Portrait,
    Landscape,
}

impl From<PaperArg> for PageSize {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::FourBySix => Self::FourBySix,
            PaperArg::ThreeByFive => Self::ThreeByFive,
        }
    }
}

impl From<PhotoArg> for PhotoSize {
    fn from(arg: PhotoArg) -> Self {
        match arg {
            PhotoArg::Passport => Self::Passport,
            PhotoArg::ThreeByFour => Self::ThreeByFour,
            PhotoArg::Square => Self::Square,
            PhotoArg::FiveBySeven => Self::FiveBySeven,
        }
    }
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Portrait => Self::Portrait,
            OrientationArg::Landscape => Self::Landscape,
        }
    }
}

fn parse_crop(value: &str) -> Result<CropBox, String> {
    let parts = value
        .split(',')
        .map(|part| part.trim().parse::<f32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid number in crop: {e}"))?;

    match parts.as_slice() {
        [x, y, width, height] if *width > 0.0 && *height > 0.0 => {
            Ok(CropBox::new(*x, *y, *width, *height))
        }
        [_, _, _, _] => Err("crop width and height must be positive".to_string()),
        _ => Err("expected x,y,width,height".to_string()),
    }
}

fn parse_photo_mm(value: &str) -> Result<PhotoSize, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width_mm: f32 = width.trim().parse().map_err(|e| format!("invalid width: {e}"))?;
    let height_mm: f32 = height.trim().parse().map_err(|e| format!("invalid height: {e}"))?;
    Ok(PhotoSize::Custom {
        width_mm,
        height_mm,
    })
}

impl LayoutArgs {
    /// Start from the config file (or defaults) and apply explicit flags on top
    async fn resolve(&self) -> Result<SheetOptions> {
        let mut options = match &self.config {
            Some(path) => SheetOptions::load(path)
                .await
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => SheetOptions::default(),
        };

        if let Some(paper) = self.paper {
            options.page_size = paper.into();
        }
        if let Some(photo) = self.photo {
            options.photo_size = photo.into();
        }
        if let Some(photo) = self.photo_mm {
            options.photo_size = photo;
        }
        if let Some(orientation) = self.orientation {
            options.orientation = orientation.into();
        }
        if let Some(margin) = self.margin_mm {
            options.margin_mm = margin;
        }
        if let Some(gap) = self.gap_mm {
            options.gap_mm = gap;
        }

        options.validate()?;
        Ok(options)
    }
}

fn print_statistics(options: &SheetOptions, stats: &SheetStatistics) {
    println!("Sheet Statistics:");
    println!(
        "  Paper: {} {:?} ({}x{} px)",
        options.page_size.label(),
        options.orientation,
        stats.page.width_px,
        stats.page.height_px
    );
    println!(
        "  Photo: {} ({}x{} px)",
        options.photo_size.label(),
        stats.cell.width_px,
        stats.cell.height_px
    );
    println!("  Grid: {} columns x {} rows", stats.columns, stats.rows);
    println!("  Photos per sheet: {}", stats.photos_per_sheet);
    println!("  Paper coverage: {:.1}%", stats.coverage * 100.0);
}

fn print_sizes() {
    println!("Paper sizes (landscape, 300 DPI):");
    for page in PageSize::ALL {
        let size = page.size_with_orientation(Orientation::Landscape);
        println!(
            "  {:<8} {:<12} {}x{} px",
            page.key(),
            page.label(),
            size.width_px,
            size.height_px
        );
    }

    println!("Photo sizes (300 DPI):");
    for photo in PhotoSize::ALL {
        let size = photo.cell_size();
        println!(
            "  {:<8} {:<12} {}x{} px",
            photo.key(),
            photo.label(),
            size.width_px,
            size.height_px
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::StderrLogger::init(cli.verbose)?;

    match cli.command {
        Commands::Sheet {
            input,
            output,
            layout,
            rotate,
            crop,
            no_guides,
            quality,
            stats_only,
        } => {
            let mut options = layout.resolve().await?;
            if no_guides {
                options.guides.enabled = false;
            }
            if let Some(quality) = quality {
                options.jpeg_quality = quality;
            }

            let stats = calculate_statistics(&options)?;
            print_statistics(&options, &stats);

            if stats_only {
                return Ok(());
            }
            if stats.photos_per_sheet == 0 {
                log::warn!("The photo does not fit on the paper; the sheet will be blank");
            }

            let mut session: Session = Session::new(options);

            let upload = load_upload(&input)
                .await
                .with_context(|| format!("Failed to read {}", input.display()))?;
            let ticket = session.begin_upload(&upload)?;
            let decoded = decode_upload(upload).await;
            session.finish_upload(&ticket, decoded)?;

            if rotate != 0.0 {
                session.rotate_to(rotate)?;
            }
            if let Some(selection) = crop {
                let Some(cropper) = session.cropper_mut() else {
                    bail!("No photo loaded");
                };
                cropper.set_selection(selection);
            }

            session.render_preview()?;
            let sheet = session.export()?;
            let output = output.unwrap_or_else(|| PathBuf::from(&sheet.file_name));
            save_sheet(&sheet.bytes, &output).await?;

            println!(
                "Rendered {} photos → {}",
                stats.photos_per_sheet,
                output.display()
            );
        }

        Commands::Stats { layout } => {
            let options = layout.resolve().await?;
            let stats = calculate_statistics(&options)?;
            print_statistics(&options, &stats);
        }

        Commands::Sizes => print_sizes(),
    }

    Ok(())
}
