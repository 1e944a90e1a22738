use ndarray::{Axis, concatenate, s};

use super::{Signature, as_index};
use crate::matrix::{Matrix, MatrixType};
use crate::value::Value;

const GET_CHANNEL_COUNT: Signature = Signature {
    overloads: &["[Number] GetChannelCount([Mat] mat)"],
    arity: "1",
};

pub(super) fn get_channel_count(args: Vec<Value>) -> Result<Value, Value> {
    let [mat] = GET_CHANNEL_COUNT.arguments(args)?;
    let m = GET_CHANNEL_COUNT.matrix("mat", mat)?;
    Ok(Value::Number(m.channels() as f64))
}

/// Validates a channel index against `m`, rounding half to even.
fn channel_index(signature: &Signature, raw: f64, m: &Matrix) -> Result<usize, Value> {
    as_index(raw)
        .filter(|&index| index >= 0 && (index as usize) < m.channels())
        .map(|index| index as usize)
        .ok_or_else(|| {
            signature.error(
                "Channel Out Of Range",
                format!(
                    "channel '{}' is out of range for mat '{}' which has {} channel(s) (Note: The first channel starts at channel 0, not 1)",
                    raw,
                    m,
                    m.channels()
                ),
            )
        })
}

const GET_CHANNEL: Signature = Signature {
    overloads: &["[1-Channel Mat] GetChannel([n-Channel Mat] mat, [Number (>= 0, < n)] channel)"],
    arity: "2",
};

pub(super) fn get_channel(args: Vec<Value>) -> Result<Value, Value> {
    let [mat, channel] = GET_CHANNEL.arguments(args)?;
    let m = GET_CHANNEL.matrix("mat", mat)?;
    let raw = GET_CHANNEL.number("channel", channel)?;
    let index = channel_index(&GET_CHANNEL, raw, &m)?;

    let data = m.data().slice(s![.., .., index..index + 1]).to_owned();
    Ok(Value::Matrix(Matrix::generic(data)))
}

const REPLACE_CHANNEL: Signature = Signature {
    overloads: &[
        "[n-Channel Mat] ReplaceChannel([n-Channel Mat] mat, [Number (>= 0, < n)] channel, [1-Channel Mat] replaceMat)",
    ],
    arity: "3",
};

pub(super) fn replace_channel(args: Vec<Value>) -> Result<Value, Value> {
    let [mat, channel, replace_mat] = REPLACE_CHANNEL.arguments(args)?;
    let m = REPLACE_CHANNEL.matrix("mat", mat)?;
    let raw = REPLACE_CHANNEL.number("channel", channel)?;
    let replacement = REPLACE_CHANNEL.matrix("replaceMat", replace_mat)?;
    let index = channel_index(&REPLACE_CHANNEL, raw, &m)?;
    REPLACE_CHANNEL.channels("replaceMat", &replacement, 1)?;
    REPLACE_CHANNEL.same_size("replaceMat", &replacement, &m)?;

    // the replacement may hold any values, so a mask stops being one
    let kind = match m.kind() {
        MatrixType::Mask => MatrixType::Matrix,
        kind => kind,
    };
    let mut data = m.into_data();
    data.slice_mut(s![.., .., index..index + 1])
        .assign(replacement.data());
    REPLACE_CHANNEL.finish(Matrix::new(kind, data))
}

const COMBINE_CHANNELS: Signature = Signature {
    overloads: &["[Mat] CombineChannels([Mat] mats...)"],
    arity: "1 or more",
};

pub(super) fn combine_channels(args: Vec<Value>) -> Result<Value, Value> {
    let mats = args
        .into_iter()
        .map(|arg| COMBINE_CHANNELS.matrix("mat", arg))
        .collect::<Result<Vec<_>, _>>()?;
    let Some(first) = mats.first() else {
        return Err(COMBINE_CHANNELS.arity_error(0));
    };
    for m in &mats[1..] {
        COMBINE_CHANNELS.same_size("mat", m, first)?;
    }

    let total: usize = mats.iter().map(Matrix::channels).sum();
    if total > 4 {
        return Err(COMBINE_CHANNELS.error(
            "Channel Out Of Range",
            format!("the combined matrix would have {} channels, but at most 4 are supported", total),
        ));
    }

    let views: Vec<_> = mats.iter().map(|m| m.data().view()).collect();
    let data = concatenate(Axis(2), &views)
        .map_err(|e| COMBINE_CHANNELS.error("Matrix", e))?;
    Ok(Value::Matrix(Matrix::generic(data)))
}

const RGB_REPLACE: Signature = Signature {
    overloads: &["[4-Channel Mat] RGBReplace([4-Channel Mat] mat, [3-Channel Mat] rgb)"],
    arity: "2",
};

pub(super) fn rgb_replace(args: Vec<Value>) -> Result<Value, Value> {
    let [mat, rgb] = RGB_REPLACE.arguments(args)?;
    let m = RGB_REPLACE.matrix("mat", mat)?;
    let rgb = RGB_REPLACE.matrix("rgb", rgb)?;
    RGB_REPLACE.channels("mat", &m, 4)?;
    RGB_REPLACE.channels("rgb", &rgb, 3)?;
    RGB_REPLACE.same_size("rgb", &rgb, &m)?;

    let kind = m.kind();
    let mut data = m.into_data();
    data.slice_mut(s![.., .., 0..3]).assign(rgb.data());
    RGB_REPLACE.finish(Matrix::new(kind, data))
}

const ALPHA_REPLACE: Signature = Signature {
    overloads: &["[4-Channel Mat] AlphaReplace([4-Channel Mat] mat, [1-Channel Mat] alpha)"],
    arity: "2",
};

pub(super) fn alpha_replace(args: Vec<Value>) -> Result<Value, Value> {
    let [mat, alpha] = ALPHA_REPLACE.arguments(args)?;
    let m = ALPHA_REPLACE.matrix("mat", mat)?;
    let alpha = ALPHA_REPLACE.matrix("alpha", alpha)?;
    ALPHA_REPLACE.channels("mat", &m, 4)?;
    ALPHA_REPLACE.channels("alpha", &alpha, 1)?;
    ALPHA_REPLACE.same_size("alpha", &alpha, &m)?;

    let kind = m.kind();
    let mut data = m.into_data();
    data.slice_mut(s![.., .., 3..4]).assign(alpha.data());
    ALPHA_REPLACE.finish(Matrix::new(kind, data))
}

const GET_RGB: Signature = Signature {
    overloads: &["[3-Channel Mat] GetRGB([3-Channel or 4-Channel Mat] mat)"],
    arity: "1",
};

pub(super) fn get_rgb(args: Vec<Value>) -> Result<Value, Value> {
    let [mat] = GET_RGB.arguments(args)?;
    let m = GET_RGB.matrix("mat", mat)?;
    match m.channels() {
        3 => Ok(Value::Matrix(m)),
        4 => {
            let kind = m.kind().without_alpha();
            let data = m.data().slice(s![.., .., 0..3]).to_owned();
            GET_RGB.finish(Matrix::new(kind, data))
        }
        _ => Err(GET_RGB.type_error("mat", &Value::Matrix(m), "a 3-channel or 4-channel [Mat]")),
    }
}
