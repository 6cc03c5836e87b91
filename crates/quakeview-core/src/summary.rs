//! Per-product summaries for the event page overview.
//!
//! Each supported product type is reduced to the handful of values its
//! summary card shows. Values are pre-formatted with a [`Formatter`] so the
//! caller only has to lay them out.

use crate::attribution::Contributors;
use crate::event::{EventDetails, Product};
use crate::format::Formatter;
use crate::origin::{preferred_origin, ORIGIN, PHASE_DATA};

/// Product types with a summary card, in page order.
pub const SUMMARY_TYPES: &[&str] = &[
    ORIGIN,
    "shakemap",
    "dyfi",
    "losspager",
    "moment-tensor",
    "focal-mechanism",
    "finite-fault",
];

const ROMAN: [&str; 10] = ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

/// Convert an intensity value to its roman numeral (I–X).
///
/// Values are rounded to the nearest integer and clamped into range.
#[must_use]
pub fn translate_mmi(mmi: f64) -> &'static str {
    if mmi.is_nan() {
        return ROMAN[0];
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (Formatter::round(mmi, 0).clamp(1.0, 10.0) as usize) - 1;
    ROMAN[index]
}

#[derive(Debug, Clone, PartialEq)]
pub struct OriginSummary {
    pub magnitude: String,
    pub magnitude_type: String,
    pub depth: String,
    pub catalog: String,
    pub origin_source: String,
    pub magnitude_source: String,
    /// `"origin"` or `"phase-data"`: which product won reconciliation.
    pub product_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DyfiSummary {
    pub max_cdi: &'static str,
    pub num_responses: String,
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShakeMapSummary {
    pub max_mmi: &'static str,
    pub magnitude: String,
    pub catalog: String,
    pub thumbnail_url: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LossPagerSummary {
    pub alert_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MomentTensorSummary {
    pub code: String,
    pub tensor_type: String,
    pub magnitude: String,
    pub depth: String,
    pub percent_double_couple: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodalPlane {
    pub strike: i64,
    pub dip: i64,
    pub rake: i64,
}

impl std::fmt::Display for NodalPlane {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.strike, self.dip, self.rake)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FocalMechanismSummary {
    pub nodal_plane_1: Option<NodalPlane>,
    pub nodal_plane_2: Option<NodalPlane>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FiniteFaultSummary {
    pub basemap_url: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductSummary {
    Origin(OriginSummary),
    /// The event has neither an `origin` nor a `phase-data` product.
    NoOrigin,
    Dyfi(DyfiSummary),
    ShakeMap(ShakeMapSummary),
    LossPager(LossPagerSummary),
    MomentTensor(MomentTensorSummary),
    FocalMechanism(FocalMechanismSummary),
    FiniteFault(FiniteFaultSummary),
}

/// Summarize the preferred product of `product_type` for an event.
///
/// `origin` and `phase-data` both resolve through origin reconciliation.
/// Returns `None` for unsupported types, or when the event has no product of
/// a non-origin type.
#[must_use]
pub fn summarize(product_type: &str, event: &EventDetails, formatter: &Formatter) -> Option<ProductSummary> {
    let products = event.products();

    if product_type == ORIGIN || product_type == PHASE_DATA {
        return Some(
            preferred_origin(products).map_or(ProductSummary::NoOrigin, |p| {
                ProductSummary::Origin(origin_summary(p, formatter))
            }),
        );
    }

    let product = products.preferred(product_type)?;
    let summary = match product_type {
        "dyfi" => ProductSummary::Dyfi(dyfi_summary(product, formatter)),
        "shakemap" => ProductSummary::ShakeMap(shakemap_summary(product, formatter)),
        "losspager" => ProductSummary::LossPager(loss_pager_summary(product, formatter)),
        "moment-tensor" => ProductSummary::MomentTensor(moment_tensor_summary(product, formatter)),
        "focal-mechanism" => ProductSummary::FocalMechanism(focal_mechanism_summary(product)),
        "finite-fault" => ProductSummary::FiniteFault(FiniteFaultSummary {
            basemap_url: product.content_url("basemap.png").map(str::to_owned),
            source: product.source.clone(),
        }),
        _ => return None,
    };
    Some(summary)
}

fn text(product: &Product, name: &str, formatter: &Formatter) -> String {
    product
        .property_str(name)
        .unwrap_or_else(|| formatter.empty.clone())
}

fn catalog(product: &Product) -> String {
    let source = product
        .property_str("eventsource")
        .unwrap_or_else(|| product.source.clone());
    let code = product
        .property_str("eventsourcecode")
        .unwrap_or_else(|| product.code.clone());
    format!("{}{}", source.to_lowercase(), code)
}

fn origin_summary(product: &Product, formatter: &Formatter) -> OriginSummary {
    OriginSummary {
        magnitude: formatter.magnitude(product.property_f64("magnitude")),
        magnitude_type: text(product, "magnitude-type", formatter),
        depth: formatter.depth(product.property_f64("depth"), "km", None, None),
        catalog: catalog(product),
        origin_source: product
            .property_str("origin-source")
            .unwrap_or_else(|| product.source.clone()),
        magnitude_source: product
            .property_str("magnitude-source")
            .unwrap_or_else(|| product.source.clone()),
        product_type: product
            .product_type
            .clone()
            .unwrap_or_else(|| ORIGIN.to_string()),
    }
}

fn dyfi_summary(product: &Product, formatter: &Formatter) -> DyfiSummary {
    let event_id = format!(
        "{}{}",
        product.property_str("eventsource").unwrap_or_default(),
        product.property_str("eventsourcecode").unwrap_or_default()
    );
    DyfiSummary {
        max_cdi: translate_mmi(product.property_f64("maxmmi").unwrap_or(f64::NAN)),
        num_responses: text(product, "num-responses", formatter),
        thumbnail_url: product
            .content_url(&format!("{event_id}_ciim.jpg"))
            .map(str::to_owned),
    }
}

fn shakemap_summary(product: &Product, formatter: &Formatter) -> ShakeMapSummary {
    ShakeMapSummary {
        max_mmi: translate_mmi(product.property_f64("maxmmi").unwrap_or(f64::NAN)),
        magnitude: formatter.magnitude(product.property_f64("magnitude")),
        catalog: catalog(product),
        thumbnail_url: product
            .content_url("download/intensity.jpg")
            .map(str::to_owned),
        source: product.source.clone(),
    }
}

fn loss_pager_summary(product: &Product, formatter: &Formatter) -> LossPagerSummary {
    LossPagerSummary {
        alert_level: product
            .property_str("alertlevel")
            .map_or_else(|| formatter.empty.clone(), |a| a.to_uppercase()),
    }
}

fn moment_tensor_summary(product: &Product, formatter: &Formatter) -> MomentTensorSummary {
    let tensor_type = product
        .property_str("derived-magnitude-type")
        .or_else(|| product.property_str("beachball-type"))
        .unwrap_or_else(|| formatter.empty.clone());
    let percent_double_couple = product
        .property_f64("percent-double-couple")
        .map_or_else(
            || formatter.empty.clone(),
            |dc| formatter.number(Some(dc * 100.0), Some(0), &formatter.empty, ""),
        );

    MomentTensorSummary {
        code: product.code.clone(),
        tensor_type,
        magnitude: formatter.magnitude(product.property_f64("derived-magnitude")),
        depth: formatter.depth(product.property_f64("derived-depth"), "km", Some(0), None),
        percent_double_couple,
        source: product
            .property_str("beachball-source")
            .unwrap_or_else(|| product.source.clone()),
    }
}

fn nodal_plane(product: &Product, index: u8) -> Option<NodalPlane> {
    #[allow(clippy::cast_possible_truncation)]
    let angle = |name: &str| {
        product
            .property_f64(&format!("nodal-plane-{index}-{name}"))
            .map(|v| Formatter::round(v, 0) as i64)
    };
    Some(NodalPlane {
        strike: angle("strike")?,
        dip: angle("dip")?,
        rake: angle("rake").or_else(|| angle("slip"))?,
    })
}

fn focal_mechanism_summary(product: &Product) -> FocalMechanismSummary {
    FocalMechanismSummary {
        nodal_plane_1: nodal_plane(product, 1),
        nodal_plane_2: nodal_plane(product, 2),
        source: product
            .property_str("beachball-source")
            .unwrap_or_else(|| product.source.clone()),
    }
}

impl ProductSummary {
    /// Render as `label: value` lines for terminal output.
    #[must_use]
    pub fn render(&self, contributors: &Contributors, formatter: &Formatter) -> String {
        let mut lines: Vec<(&str, String)> = Vec::new();
        match self {
            ProductSummary::NoOrigin => {
                return "No origin product found for this event.".to_string();
            }
            ProductSummary::Origin(s) => {
                lines.push(("Mag", s.magnitude.clone()));
                lines.push(("Type", s.magnitude_type.clone()));
                lines.push(("Depth", s.depth.clone()));
                lines.push(("Catalog", s.catalog.clone()));
                let source = if s.origin_source.eq_ignore_ascii_case(&s.magnitude_source) {
                    contributors.reference(&s.origin_source)
                } else {
                    format!(
                        "{}, {}",
                        contributors.reference(&s.origin_source),
                        contributors.reference(&s.magnitude_source)
                    )
                };
                lines.push(("Source", source));
                lines.push(("Product", s.product_type.clone()));
            }
            ProductSummary::Dyfi(s) => {
                lines.push(("CDI", s.max_cdi.to_string()));
                lines.push(("Responses", s.num_responses.clone()));
                push_url(&mut lines, "Image", s.thumbnail_url.as_ref());
            }
            ProductSummary::ShakeMap(s) => {
                lines.push(("MMI", s.max_mmi.to_string()));
                lines.push(("Mag", s.magnitude.clone()));
                lines.push(("Catalog", s.catalog.clone()));
                lines.push(("Source", contributors.reference(&s.source)));
                push_url(&mut lines, "Image", s.thumbnail_url.as_ref());
            }
            ProductSummary::LossPager(s) => {
                lines.push(("Alert", s.alert_level.clone()));
            }
            ProductSummary::MomentTensor(s) => {
                lines.push(("Code", s.code.clone()));
                lines.push(("Type", s.tensor_type.clone()));
                lines.push(("Mag", s.magnitude.clone()));
                lines.push(("Depth", s.depth.clone()));
                lines.push(("% DC", s.percent_double_couple.clone()));
                lines.push(("Source", contributors.reference(&s.source)));
            }
            ProductSummary::FocalMechanism(s) => {
                let plane = |p: Option<NodalPlane>| {
                    p.map_or_else(|| formatter.empty.clone(), |p| p.to_string())
                };
                lines.push(("NP1 strike,dip,rake", plane(s.nodal_plane_1)));
                lines.push(("NP2 strike,dip,rake", plane(s.nodal_plane_2)));
                lines.push(("Source", contributors.reference(&s.source)));
            }
            ProductSummary::FiniteFault(s) => {
                push_url(&mut lines, "Basemap", s.basemap_url.as_ref());
                lines.push(("Source", contributors.reference(&s.source)));
            }
        }

        lines
            .into_iter()
            .map(|(label, value)| format!("{label}: {value}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn push_url<'a>(lines: &mut Vec<(&'a str, String)>, label: &'a str, url: Option<&String>) {
    if let Some(url) = url {
        lines.push((label, url.clone()));
    }
}

#[cfg(test)]
#[path = "summary_test.rs"]
mod tests;
