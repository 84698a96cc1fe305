//! One-line operand descriptions and multi-line model summaries for logs.

use std::fmt::Write;

use super::{Model, Operand};

/// `[d0, d1, ...] TYPE`, e.g. `[1, 224, 224, 3] TENSOR_FLOAT32`.
pub fn operand_summary(operand: &Operand) -> String {
    let dims: Vec<String> = operand.dimensions.iter().map(|d| d.to_string()).collect();
    format!("[{}] {}", dims.join(", "), operand.operand_type)
}

fn push_operands(out: &mut String, model: &Model, indexes: &[u32]) {
    for &index in indexes {
        match model.operands.get(index as usize) {
            Some(operand) => out.push_str(&operand_summary(operand)),
            None => {
                let _ = write!(out, "<invalid operand {}>", index);
            }
        }
        out.push_str(", ");
    }
}

/// Counts line followed by `Inputs:`, `Operations:` and `Outputs:` lines.
pub fn model_summary(model: &Model) -> String {
    let mut out = format!(
        "{} input(s), {} operation(s), {} output(s), {} operand(s)\n",
        model.input_indexes.len(),
        model.operations.len(),
        model.output_indexes.len(),
        model.operands.len()
    );

    out.push_str("Inputs: ");
    push_operands(&mut out, model, &model.input_indexes);
    out.push('\n');

    out.push_str("Operations: ");
    for operation in &model.operations {
        out.push_str(operation.operation_type.name());
        out.push_str(", ");
    }
    out.push('\n');

    out.push_str("Outputs: ");
    push_operands(&mut out, model, &model.output_indexes);
    out.push('\n');

    out
}
