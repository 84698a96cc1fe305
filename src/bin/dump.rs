//! strata-dump: Render a raw tensor buffer as a `.dump` artifact.

use std::path::PathBuf;
use std::process;

use clap::Parser;

use strata_layout::cli;
use strata_layout::dump::{dump_tensor, render_tensor_dump, tensor_dump_path};
use strata_layout::permute::{swizzle_nn4d_tensor, swizzled_info};
use strata_layout::tensor::{ConstTensor, DataType, TensorInfo, TensorShape};

#[derive(Parser)]
#[command(name = "strata-dump", about = "Dump a raw tensor buffer as text")]
struct Args {
    /// Raw row-major tensor bytes in native byte order
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Comma-separated extents, e.g. 1,224,224,3
    #[arg(short = 's', long)]
    shape: String,

    /// Element type: f32, qasymm8 or i32
    #[arg(short = 't', long, default_value = "f32", value_parser = cli::parse_data_type)]
    dtype: DataType,

    /// Quantization scale (qasymm8 only)
    #[arg(long, default_value = "0")]
    scale: f32,

    /// Quantization zero point (qasymm8 only)
    #[arg(long, default_value = "0")]
    zero_point: i32,

    /// Swizzle a 4D tensor first: 0,2,3,1 or nhwc-to-nchw / nchw-to-nhwc
    #[arg(short = 'p', long)]
    permute: Option<String>,

    /// Directory to write the dump into (must exist)
    #[arg(short = 'd', long, default_value = ".", conflicts_with = "stdout")]
    dump_dir: PathBuf,

    /// Request name used in the artifact file name
    #[arg(long, default_value = "request")]
    request_name: String,

    /// Tensor name used in the artifact file name
    #[arg(long, default_value = "tensor")]
    tensor_name: String,

    /// Print the dump to stdout instead of writing a file
    #[arg(long)]
    stdout: bool,

    /// Suppress all logging
    #[arg(long)]
    log_disable: bool,
}

fn main() {
    let args = Args::parse();
    cli::init_logging(args.log_disable);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let dims = cli::parse_dims(&args.shape)?;
    let info = TensorInfo::new(TensorShape::new(&dims)?, args.dtype)
        .with_quantization(args.scale, args.zero_point);
    let data = cli::read_buffer(&args.input)?;

    let (info, data) = match args.permute.as_deref() {
        Some(spec) => {
            let mappings = cli::parse_permutation(spec)?;
            let mut swizzled = vec![0u8; info.num_bytes()];
            swizzle_nn4d_tensor(&info, &data, &mut swizzled, &mappings)?;
            (swizzled_info(&info, &mappings)?, swizzled)
        }
        None => (info, data),
    };

    let tensor = ConstTensor::new(&info, &data)?;

    if args.stdout {
        print!("{}", render_tensor_dump(&tensor));
        return Ok(());
    }

    dump_tensor(&args.dump_dir, &args.request_name, &args.tensor_name, &tensor);
    println!(
        "{}",
        tensor_dump_path(&args.dump_dir, &args.request_name, &args.tensor_name).display()
    );
    Ok(())
}
