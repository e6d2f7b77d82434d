//! Output formatting utilities
//!
//! Provides table and JSON output formatting for CLI results.

use crate::cli::args::OutputFormat;
use crate::inspect::PreflightReport;
use crate::render::PlotParameters;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;

/// Format and print output based on the selected format
pub fn print_output<T: Serialize + TableDisplay>(data: &T, format: OutputFormat) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    match format {
        OutputFormat::Table => {
            writeln!(handle, "{}", data.to_table())?;
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(data).unwrap_or_else(|_| "{}".to_string());
            writeln!(handle, "{}", json)?;
        }
        OutputFormat::Compact => {
            writeln!(handle, "{}", data.to_compact())?;
        }
    }

    Ok(())
}

/// Trait for types that can be displayed as a table
pub trait TableDisplay {
    /// Format as a table string
    fn to_table(&self) -> String;

    /// Format as a compact single line
    fn to_compact(&self) -> String {
        self.to_table().replace('\n', " | ")
    }
}

/// Everything that would be sent to the renderer, plus what the preflight found
#[derive(Debug, Clone, Serialize)]
pub struct PlotSummary {
    pub renderer: String,
    pub layers: Vec<&'static str>,
    pub parameters: PlotParameters,
    pub preflight: PreflightReport,
}

fn opt_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn opt_angle(angle: Option<f64>) -> String {
    angle.map(|a| format!("{}°", a)).unwrap_or_else(|| "default".to_string())
}

impl TableDisplay for PlotSummary {
    fn to_table(&self) -> String {
        let p = &self.parameters;
        let mut output = format!("Renderer: {} (dry run, not started)\n", self.renderer);
        output.push_str(&format!("Layers: {}\n\n", self.layers.join(", ")));

        if p.nifti_path.is_some() {
            output.push_str(&format!("Image:          {}\n", opt_path(&p.nifti_path)));
            if let Some(dims) = &self.preflight.image_shape {
                let dims: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                output.push_str(&format!("  Dimensions:   {}\n", dims.join("x")));
            }
            let slice = match (self.preflight.slice_index, self.preflight.slice_count) {
                (Some(index), Some(count)) => format!("{} of {} ({})", index, count, p.data_slice),
                _ => p.data_slice.to_string(),
            };
            output.push_str(&format!("  Slice:        {} {}\n", p.orientation, slice));
            match (p.volume_idx, self.preflight.volume_count) {
                (Some(idx), Some(count)) => {
                    output.push_str(&format!("  Volume:       {} of {}\n", idx, count))
                }
                (Some(idx), None) => output.push_str(&format!("  Volume:       {}\n", idx)),
                (None, Some(count)) if count > 1 => {
                    output.push_str(&format!("  Volumes:      {}\n", count))
                }
                _ => {}
            }
            let range = p
                .value_range
                .map(|(low, high)| format!("{} to {}", low, high))
                .unwrap_or_else(|| "image min/max".to_string());
            output.push_str(&format!("  Value range:  {}\n", range));
            output.push_str(&format!("  Interpolation: {}\n", p.interpolation));
            output.push_str(&format!("  Colorbar:     {}\n", p.scalar_colorbar));
        }

        if let Some(tracts) = &p.tractography {
            output.push_str(&format!("Tractography:   {} file(s)\n", tracts.len()));
            for (i, path) in tracts.iter().enumerate() {
                let value = p
                    .tractography_values
                    .as_ref()
                    .and_then(|v| v.get(i))
                    .map(|v| format!(" = {}", v))
                    .unwrap_or_default();
                output.push_str(&format!("  - {}{}\n", path.display(), value));
            }
            if let (Some(cmap), Some((low, high))) =
                (&p.tractography_cmap, p.tractography_cmap_range)
            {
                output.push_str(&format!("  Colormap:     {} ({} to {})\n", cmap, low, high));
            }
            output.push_str(&format!("  Opacity:      {}\n", p.tractography_opacity));
            output.push_str(&format!("  Colorbar:     {}\n", p.tractography_colorbar));
        }

        if p.tensor_image.is_some() {
            output.push_str(&format!("Tensor image:   {}\n", opt_path(&p.tensor_image)));
        }
        if p.odf_image.is_some() {
            let order = self
                .preflight
                .sh_order
                .map(|o| format!(", order {}", o))
                .unwrap_or_default();
            output.push_str(&format!(
                "ODF image:      {} ({}{})\n",
                opt_path(&p.odf_image),
                p.sh_basis,
                order
            ));
        }
        if p.tensor_image.is_some() || p.odf_image.is_some() {
            output.push_str(&format!("  Glyph scale:  {}\n", p.scale));
        }
        if p.glass_brain_path.is_some() {
            output.push_str(&format!("Glass brain:    {}\n", opt_path(&p.glass_brain_path)));
        }

        output.push_str(&format!("Window:         {}x{}\n", p.size.0, p.size.1));
        output.push_str(&format!(
            "Camera:         azimuth {}, elevation {}\n",
            opt_angle(p.azimuth),
            opt_angle(p.elevation)
        ));
        output.push_str(&format!("Save path:      {}\n", opt_path(&p.save_path)));
        output.push_str(&format!("Interactive:    {}", p.interactive));

        output
    }

    fn to_compact(&self) -> String {
        let p = &self.parameters;
        let slice = self
            .preflight
            .slice_index
            .map(|i| i.to_string())
            .unwrap_or_else(|| p.data_slice.to_string());
        format!(
            "{} [{}] {} slice {} -> {}",
            opt_path(&p.nifti_path),
            self.layers.join("+"),
            p.orientation,
            slice,
            opt_path(&p.save_path)
        )
    }
}

/// Simple message output
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub message: String,
    pub success: bool,
}

impl TableDisplay for Message {
    fn to_table(&self) -> String {
        self.message.clone()
    }
}
