use super::Signature;
use crate::matrix::{Matrix, MatrixType};
use crate::value::Value;

const TO_IMAGE: Signature = Signature {
    overloads: &["[Image] ToImage([1-Channel, 3-Channel or 4-Channel Mat] mat)"],
    arity: "1",
};

/// Rounds and saturates to the 0..=255 byte range. An input that already
/// carries an image tag keeps it, otherwise the tag follows the channel
/// count (Gray, BGR, BGRA).
pub(super) fn to_image(args: Vec<Value>) -> Result<Value, Value> {
    let [mat] = TO_IMAGE.arguments(args)?;
    let m = TO_IMAGE.matrix("mat", mat)?;

    if !matches!(m.channels(), 1 | 3 | 4) {
        return Err(TO_IMAGE.type_error(
            "mat",
            &Value::Matrix(m),
            "a 1-channel, 3-channel or 4-channel [Mat]",
        ));
    }
    let kind = if m.kind().is_image() {
        m.kind()
    } else {
        MatrixType::image_for_channels(m.channels()).unwrap_or(MatrixType::UnknownImage)
    };

    let mut data = m.into_data();
    data.mapv_inplace(saturate_byte);
    TO_IMAGE.finish(Matrix::new(kind, data))
}

fn saturate_byte(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.round_ties_even().clamp(0.0, 255.0)
    }
}

const TO_MATRIX: Signature = Signature {
    overloads: &["[Matrix] ToMatrix([Mat] mat)"],
    arity: "1",
};

pub(super) fn to_matrix(args: Vec<Value>) -> Result<Value, Value> {
    let [mat] = TO_MATRIX.arguments(args)?;
    let m = TO_MATRIX.matrix("mat", mat)?;
    TO_MATRIX.finish(m.with_kind(MatrixType::Matrix))
}
