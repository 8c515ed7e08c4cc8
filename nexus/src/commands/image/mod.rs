use crate::context::AppContext;
use crate::format::{self, Formattable, OutputFormat};
use libnexus::SizeReport;
use libnexus::format::format_size;
use serde::Serialize;
use tabled::Tabled;

pub mod handlers;

/// Images of the repository after filtering
#[derive(Debug, Serialize)]
pub struct ImageList {
    pub images: Vec<String>,
    pub total: usize,
    /// Print names only, without the summary line
    #[serde(skip)]
    pub images_only: bool,
}

impl ImageList {
    pub fn new(images: Vec<String>, images_only: bool) -> Self {
        Self {
            total: images.len(),
            images,
            images_only,
        }
    }
}

impl Formattable for ImageList {
    fn format_pretty(&self) -> String {
        let mut lines = self.images.clone();
        if !self.images_only {
            lines.push(format!("Total images: {}", self.total));
        }
        lines.join("\n")
    }
}

/// Filtered and sorted tags of one image
#[derive(Debug, Serialize)]
pub struct TagList {
    pub name: String,
    pub tags: Vec<String>,
    pub total: usize,
}

impl TagList {
    pub fn new(name: &str, tags: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            total: tags.len(),
            tags,
        }
    }
}

impl Formattable for TagList {
    fn format_pretty(&self) -> String {
        let mut lines = self.tags.clone();
        lines.push(format!("There are {} images for {}", self.total, self.name));
        lines.join("\n")
    }
}

/// One layer row of the info table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct LayerRow {
    #[tabled(rename = "DIGEST")]
    pub digest: String,

    #[tabled(rename = "SIZE")]
    #[serde(skip)]
    pub size_display: String,

    #[tabled(skip)]
    pub size: u64,
}

/// Size breakdown printed by `image info`
#[derive(Debug, Serialize)]
pub struct ImageInfo {
    pub image: String,
    pub tag: Option<String>,
    pub config_size: u64,
    pub layers: Vec<LayerRow>,
    pub total_layer_size: u64,
    pub total_size: u64,
    #[serde(skip)]
    pub humanize: bool,
}

impl ImageInfo {
    pub fn from_report(image: &str, tag: Option<&str>, report: SizeReport, humanize: bool) -> Self {
        let layers = report
            .layers
            .into_iter()
            .map(|layer| LayerRow {
                size_display: format_size(layer.size, humanize),
                digest: layer.digest,
                size: layer.size,
            })
            .collect();

        Self {
            image: image.to_string(),
            tag: tag.map(str::to_string),
            config_size: report.config_size,
            layers,
            total_layer_size: report.total_layer_size,
            total_size: report.total_size,
            humanize,
        }
    }

    fn reference(&self) -> String {
        match &self.tag {
            Some(tag) => format!("{}:{}", self.image, tag),
            None => self.image.clone(),
        }
    }
}

impl Formattable for ImageInfo {
    fn format_pretty(&self) -> String {
        use tabled::{Table, settings::Style};

        let mut output = format!(
            "Image: {}\nSize: {}\nLayers:\n",
            self.reference(),
            format_size(self.config_size, self.humanize)
        );
        if !self.layers.is_empty() {
            output.push_str(&Table::new(&self.layers).with(Style::empty()).to_string());
            output.push('\n');
        }
        output.push_str(&format!(
            "Total layers size: {}\nTotal size: {}",
            format_size(self.total_layer_size, self.humanize),
            format_size(self.total_size, self.humanize)
        ));
        output
    }
}

/// Line announcing the deletion of one tag
pub fn deletion_line(image: &str, tag: &str, dry_run: bool) -> String {
    if dry_run {
        format!("{}:{} image would be deleted", image, tag)
    } else {
        format!("{}:{} image will be deleted ...", image, tag)
    }
}

/// Print a formattable item or exit with an error
fn print_output<T: Formattable>(ctx: &AppContext, item: &T, format: OutputFormat) {
    match format::format_output(item, format) {
        Ok(output) => println!("{}", output),
        Err(e) => exit_with(ctx, &e),
    }
}

/// Report an error and exit with status 1
fn exit_with(ctx: &AppContext, message: &str) -> ! {
    format::error(ctx, message);
    std::process::exit(1);
}
