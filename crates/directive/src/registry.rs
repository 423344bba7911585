//! Operation registry
//!
//! Fixed, ordered catalog of every operation the directive grammar knows.
//! Token matching is first-match in table order; `verify_registry` proves at
//! startup that no entry's name is a prefix of another, so the order can
//! never silently decide between two candidates.
//!
//! Process functions carry the operation-specific translation quirks:
//! zero width/height are omitted rather than passed, colors gain their `#`,
//! resize positions drop the `_` separator, and out-of-range blur sigmas
//! degrade to a no-op.

use once_cell::sync::Lazy;
use pictor_imaging::{ArgValue, ImageFormat, ImagePipeline, OpArgs};

use crate::spec::{flag, num, text};
use crate::{DirectiveError, OperationSpec, ParamKind, ParamSpec, ParamValue, ResolvedParams};

#[cfg(test)]
#[path = "registry_test.rs"]
mod tests;

/// Formats the `jpg` encode-options operation applies to
const JPEG_SOURCES: &[ImageFormat] = &[ImageFormat::Jpg, ImageFormat::Jpeg];

/// Formats the `png` encode-options operation applies to
const PNG_SOURCES: &[ImageFormat] = &[ImageFormat::Png];

static REGISTRY: Lazy<Vec<OperationSpec>> = Lazy::new(build_registry);

/// All registered operations, in match order
pub fn operations() -> &'static [OperationSpec] {
    &REGISTRY
}

/// Exact-name lookup
pub fn lookup(name: &str) -> Option<&'static OperationSpec> {
    REGISTRY.iter().find(|op| op.name == name)
}

/// First operation whose name the token starts with, in table order
pub fn match_prefix(token: &str) -> Option<&'static OperationSpec> {
    REGISTRY.iter().find(|op| token.starts_with(op.name))
}

/// Reject a catalog where one operation name is a proper prefix of another
///
/// Run from config validation at startup. With a clean catalog, first-match
/// and longest-match are the same thing.
pub fn verify_registry() -> Result<(), DirectiveError> {
    for (i, a) in REGISTRY.iter().enumerate() {
        for b in &REGISTRY[i + 1..] {
            if b.name.starts_with(a.name) {
                return Err(DirectiveError::AmbiguousRegistry {
                    shorter: a.name,
                    longer: b.name,
                });
            }
            if a.name.starts_with(b.name) {
                return Err(DirectiveError::AmbiguousRegistry {
                    shorter: b.name,
                    longer: a.name,
                });
            }
        }
    }
    Ok(())
}

// =============================================================================
// Schema shorthand
// =============================================================================

fn p_num(key: &'static str, name: &'static str, default: f64) -> ParamSpec {
    ParamSpec::new(key, name, ParamKind::Number, ParamValue::Num(default))
}

fn p_color(key: &'static str, name: &'static str) -> ParamSpec {
    ParamSpec::new(key, name, ParamKind::Color, ParamValue::str("000000"))
}

fn p_bool(key: &'static str, name: &'static str, default: bool) -> ParamSpec {
    ParamSpec::new(key, name, ParamKind::Boolean, ParamValue::Bool(default))
}

fn p_enum(
    key: &'static str,
    name: &'static str,
    allowed: &'static [&'static str],
    default: &'static str,
) -> ParamSpec {
    ParamSpec::new(key, name, ParamKind::Enum(allowed), ParamValue::str(default))
}

fn hex(params: &ResolvedParams, key: &str) -> ArgValue {
    ArgValue::Str(format!("#{}", text(params, key)))
}

// =============================================================================
// The catalog
// =============================================================================

fn build_registry() -> Vec<OperationSpec> {
    vec![
        OperationSpec {
            name: "resize",
            desc: "Resize the image",
            params: vec![
                p_num("h", "height", 0.0),
                p_num("w", "width", 0.0),
                p_enum(
                    "f",
                    "fit",
                    &["cover", "contain", "fill", "inside", "outside"],
                    "cover",
                ),
                p_enum(
                    "p",
                    "position",
                    &[
                        "top",
                        "bottom",
                        "left",
                        "right",
                        "right_top",
                        "right_bottom",
                        "left_top",
                        "left_bottom",
                        "center",
                    ],
                    "center",
                ),
                p_color("b", "background"),
                p_bool("we", "withoutEnlargement", false),
            ],
            restrict_formats: None,
            process: process_resize,
        },
        OperationSpec {
            name: "extend",
            desc: "Pad the edges with the background colour",
            params: vec![
                p_num("t", "top", 10.0),
                p_num("l", "left", 10.0),
                p_num("b", "bottom", 10.0),
                p_num("r", "right", 10.0),
                p_color("bc", "background"),
            ],
            restrict_formats: None,
            process: process_extend,
        },
        OperationSpec {
            name: "extract",
            desc: "Extract a region of the image",
            params: vec![
                p_num("t", "top", 10.0),
                p_num("l", "left", 10.0),
                p_num("h", "height", 50.0),
                p_num("w", "width", 20.0),
            ],
            restrict_formats: None,
            process: process_extract,
        },
        OperationSpec {
            name: "trim",
            desc: "Trim edges similar to the top-left pixel",
            params: vec![p_num("t", "threshold", 10.0)],
            restrict_formats: None,
            process: process_trim,
        },
        OperationSpec {
            name: "rotate",
            desc: "Rotate the image",
            params: vec![p_num("a", "angle", 0.0), p_color("b", "background")],
            restrict_formats: None,
            process: process_rotate,
        },
        OperationSpec {
            name: "flip",
            desc: "Mirror about the X axis",
            params: vec![],
            restrict_formats: None,
            process: |_, img| img.apply("flip", &OpArgs::new()),
        },
        OperationSpec {
            name: "flop",
            desc: "Mirror about the Y axis",
            params: vec![],
            restrict_formats: None,
            process: |_, img| img.apply("flop", &OpArgs::new()),
        },
        OperationSpec {
            name: "sharpen",
            desc: "Sharpen the image",
            params: vec![
                p_num("s", "sigma", 1.0),
                p_num("f", "flat", 1.0),
                p_num("j", "jagged", 2.0),
            ],
            restrict_formats: None,
            process: process_sharpen,
        },
        OperationSpec {
            name: "median",
            desc: "Median filter",
            params: vec![p_num("s", "size", 3.0)],
            restrict_formats: None,
            process: process_median,
        },
        OperationSpec {
            name: "blur",
            desc: "Gaussian blur",
            params: vec![p_num("s", "sigma", 1.0)],
            restrict_formats: None,
            process: process_blur,
        },
        OperationSpec {
            name: "flatten",
            desc: "Merge alpha onto the background colour",
            params: vec![p_color("b", "background")],
            restrict_formats: None,
            process: process_flatten,
        },
        OperationSpec {
            name: "negate",
            desc: "Produce the negative",
            params: vec![],
            restrict_formats: None,
            process: |_, img| img.apply("negate", &OpArgs::new()),
        },
        OperationSpec {
            name: "normalise",
            desc: "Stretch contrast to the full range",
            params: vec![],
            restrict_formats: None,
            process: |_, img| img.apply("normalize", &OpArgs::new()),
        },
        OperationSpec {
            name: "linear",
            desc: "Levels adjustment: a * input + b",
            params: vec![p_num("a", "a", 1.0), p_num("b", "b", 0.0)],
            restrict_formats: None,
            process: process_linear,
        },
        OperationSpec {
            name: "modulate",
            desc: "Adjust brightness, saturation, and hue",
            params: vec![
                p_num("b", "brightness", 0.5),
                p_num("s", "saturation", 0.5),
                p_num("h", "hue", 90.0),
            ],
            restrict_formats: None,
            process: process_modulate,
        },
        OperationSpec {
            name: "grey",
            desc: "Convert to greyscale",
            params: vec![],
            restrict_formats: None,
            process: |_, img| img.apply("greyscale", &OpArgs::new()),
        },
        OperationSpec {
            name: "tint",
            desc: "Tint with a colour",
            params: vec![p_color("c", "color")],
            restrict_formats: None,
            process: process_tint,
        },
        OperationSpec {
            name: "jpg",
            desc: "JPEG encode options",
            params: vec![
                p_num("q", "quality", 90.0),
                p_bool("p", "progressive", false),
                ParamSpec::new(
                    "cs",
                    "chromaSubsampling",
                    ParamKind::Str,
                    ParamValue::str("4:2:0"),
                ),
            ],
            restrict_formats: Some(JPEG_SOURCES),
            process: process_jpg,
        },
        OperationSpec {
            name: "png",
            desc: "PNG encode options",
            params: vec![
                p_num("q", "quality", 90.0),
                p_bool("p", "progressive", false),
                p_num("c", "compressionLevel", 9.0),
            ],
            restrict_formats: Some(PNG_SOURCES),
            process: process_png,
        },
    ]
}

// =============================================================================
// Process functions
// =============================================================================

fn process_resize(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    // zero dimensions mean "unconstrained" and are omitted entirely
    let height = num(params, "h");
    if height != 0.0 {
        args.insert("height", ArgValue::Num(height));
    }
    let width = num(params, "w");
    if width != 0.0 {
        args.insert("width", ArgValue::Num(width));
    }
    args.insert("fit", ArgValue::from(text(params, "f")));
    args.insert(
        "position",
        ArgValue::Str(text(params, "p").replacen('_', "", 1)),
    );
    args.insert("background", hex(params, "b"));
    args.insert("withoutEnlargement", ArgValue::Bool(flag(params, "we")));
    img.apply("resize", &args)
}

fn process_extend(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("top", ArgValue::Num(num(params, "t")));
    args.insert("left", ArgValue::Num(num(params, "l")));
    args.insert("bottom", ArgValue::Num(num(params, "b")));
    args.insert("right", ArgValue::Num(num(params, "r")));
    args.insert("background", hex(params, "bc"));
    img.apply("extend", &args)
}

fn process_extract(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("top", ArgValue::Num(num(params, "t")));
    args.insert("left", ArgValue::Num(num(params, "l")));
    args.insert("height", ArgValue::Num(num(params, "h")));
    args.insert("width", ArgValue::Num(num(params, "w")));
    img.apply("extract", &args)
}

fn process_trim(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("threshold", ArgValue::Num(num(params, "t")));
    img.apply("trim", &args)
}

fn process_rotate(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("angle", ArgValue::Num(num(params, "a")));
    args.insert("background", hex(params, "b"));
    img.apply("rotate", &args)
}

fn process_sharpen(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("sigma", ArgValue::Num(num(params, "s")));
    args.insert("flat", ArgValue::Num(num(params, "f")));
    args.insert("jagged", ArgValue::Num(num(params, "j")));
    img.apply("sharpen", &args)
}

fn process_median(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("size", ArgValue::Num(num(params, "s")));
    img.apply("median", &args)
}

fn process_blur(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let sigma = num(params, "s");
    // engine accepts sigma in (0.3, 1000); anything else is a no-op
    if sigma > 0.3 && sigma < 1000.0 {
        let mut args = OpArgs::new();
        args.insert("sigma", ArgValue::Num(sigma));
        return img.apply("blur", &args);
    }
    Ok(())
}

fn process_flatten(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("background", hex(params, "b"));
    img.apply("flatten", &args)
}

fn process_linear(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("a", ArgValue::Num(num(params, "a")));
    args.insert("b", ArgValue::Num(num(params, "b")));
    img.apply("linear", &args)
}

fn process_modulate(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("brightness", ArgValue::Num(num(params, "b")));
    args.insert("saturation", ArgValue::Num(num(params, "s")));
    args.insert("hue", ArgValue::Num(num(params, "h")));
    img.apply("modulate", &args)
}

fn process_tint(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("color", hex(params, "c"));
    img.apply("tint", &args)
}

fn process_jpg(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("quality", ArgValue::Num(num(params, "q")));
    args.insert("progressive", ArgValue::Bool(flag(params, "p")));
    args.insert("chromaSubsampling", ArgValue::from(text(params, "cs")));
    img.apply("jpeg", &args)
}

fn process_png(
    params: &ResolvedParams,
    img: &mut dyn ImagePipeline,
) -> pictor_imaging::Result<()> {
    let mut args = OpArgs::new();
    args.insert("quality", ArgValue::Num(num(params, "q")));
    args.insert("compressionLevel", ArgValue::Num(num(params, "c")));
    args.insert("progressive", ArgValue::Bool(flag(params, "p")));
    img.apply("png", &args)
}
