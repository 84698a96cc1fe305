//! Text dumps of tensor contents for offline debugging.
//!
//! Dumps are a diagnostic side channel: nothing in here returns an error.
//! I/O problems are logged at warn level and the caller carries on.

pub mod graph;

use std::fmt;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::tensor::{ConstTensor, DataType, Strides};

pub use graph::{export_network_graph_to_dot_file, network_graph_file_path, DotSerializer};

/// Per-type element formatting for the dump body.
#[derive(Debug, Clone, Copy)]
enum ElementPrinter {
    Float32,
    /// Widened to u32 so values print as numbers, not characters.
    QuantisedAsymm8,
    Signed32,
}

impl ElementPrinter {
    fn write<W: fmt::Write>(self, out: &mut W, bytes: &[u8]) -> fmt::Result {
        match self {
            Self::Float32 => {
                let v = f32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                write!(out, "{},", v)
            }
            Self::QuantisedAsymm8 => write!(out, "{},", u32::from(bytes[0])),
            Self::Signed32 => {
                let v = i32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                write!(out, "{},", v)
            }
        }
    }
}

fn memory_layout_label(rank: usize) -> &'static str {
    match rank {
        4 => "(BHWC) ",
        3 => "(HWC) ",
        2 => "(HW) ",
        _ => "",
    }
}

/// Path of the dump artifact for one tensor of one request.
pub fn tensor_dump_path(dump_dir: &Path, request_name: &str, tensor_name: &str) -> PathBuf {
    dump_dir.join(format!("{}_{}.dump", request_name, tensor_name))
}

fn write_dump<W: fmt::Write>(out: &mut W, tensor: &ConstTensor<'_>) -> fmt::Result {
    let info = tensor.info();
    let printer = match info.data_type() {
        DataType::Float32 => ElementPrinter::Float32,
        DataType::QuantisedAsymm8 => ElementPrinter::QuantisedAsymm8,
        DataType::Signed32 => ElementPrinter::Signed32,
        unsupported @ (DataType::Float16 | DataType::Boolean) => {
            return writeln!(
                out,
                "Cannot dump tensor elements: Unsupported data type {}",
                unsupported.code()
            );
        }
    };

    let dims = info.shape().dims();
    let rank = dims.len();

    let batch = if rank == 4 { dims[0] } else { 1 };
    let height = if rank >= 3 {
        dims[rank - 3]
    } else if rank >= 2 {
        dims[rank - 2]
    } else {
        1
    };
    let width = if rank >= 3 { dims[rank - 2] } else { dims[rank - 1] };
    let channels = if rank >= 3 { dims[rank - 1] } else { 1 };

    writeln!(out, "# Number of elements {}", info.num_elements())?;
    writeln!(
        out,
        "# Dimensions {}{}",
        memory_layout_label(rank),
        info.shape()
    )?;

    // Storage is channel-minor (BHWC) but the text is grouped channel-major,
    // so each channel block revisits the same spatial positions at its own
    // channel offset.
    let storage = Strides::row_major(&[batch, height, width, channels]);
    for b in 0..batch {
        if rank >= 4 {
            writeln!(out, "# Batch {}", b)?;
        }
        for c in 0..channels {
            if rank >= 3 {
                writeln!(out, "# Channel {}", c)?;
            }
            for h in 0..height {
                for w in 0..width {
                    let index = storage.offset(&[b, h, w, c]);
                    printer.write(out, tensor.element_bytes(index))?;
                }
                writeln!(out)?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out)
}

/// Render the dump artifact text for `tensor`.
///
/// The body is a header with the element count and shape, then the values
/// grouped by batch, channel and row. Unsupported data types render as a
/// single diagnostic line.
pub fn render_tensor_dump(tensor: &ConstTensor<'_>) -> String {
    let mut out = String::new();
    // Formatting into a String cannot fail.
    let _ = write_dump(&mut out, tensor);
    out
}

/// Write `tensor` to `<dump_dir>/<request_name>_<tensor_name>.dump`.
///
/// `dump_dir` must already exist. Any existing file is truncated. Failures
/// are logged and swallowed; when the file cannot be created nothing is
/// left on disk.
pub fn dump_tensor(
    dump_dir: &Path,
    request_name: &str,
    tensor_name: &str,
    tensor: &ConstTensor<'_>,
) {
    let path = tensor_dump_path(dump_dir, request_name, tensor_name);
    let contents = render_tensor_dump(tensor);

    let mut file = match File::create(&path) {
        Ok(file) => file,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Could not open file for writing");
            return;
        }
    };

    if let Err(e) = file.write_all(contents.as_bytes()).and_then(|_| file.flush()) {
        warn!(path = %path.display(), error = %e, "An error occurred when writing to file");
        return;
    }
    debug!(path = %path.display(), bytes = contents.len(), "Dumped tensor");
}
