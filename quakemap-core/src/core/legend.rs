//
// Copyright (c) Quakemap Contributors. All rights reserved.
// Licensed under the MIT License. See LICENSE file in the project root for full license information.
//

//! Depth color key

use crate::core::classify::DEPTH_BUCKETS;

/// Corner of the map a control is placed in (Leaflet naming)
#[derive(Serialize, Clone, Copy, PartialEq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct LegendEntry {
    pub lower: f64,
    pub upper: Option<f64>,
    pub color: String,
    pub label: String,
}

#[derive(Serialize, Clone, PartialEq, Debug)]
pub struct Legend {
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
}

/// Static depth legend, one entry per depth bucket
pub fn build_legend() -> Legend {
    let entries = DEPTH_BUCKETS
        .iter()
        .enumerate()
        .map(|(idx, bucket)| {
            let upper = DEPTH_BUCKETS.get(idx + 1).map(|next| next.lower);
            let label = match upper {
                Some(upper) => format!("{}\u{2013}{}", bucket.lower, upper),
                None => format!("{}+", bucket.lower),
            };
            LegendEntry {
                lower: bucket.lower,
                upper,
                color: bucket.color.to_string(),
                label,
            }
        })
        .collect();
    Legend {
        position: ControlPosition::BottomRight,
        entries,
    }
}

impl Legend {
    /// Legend control content with a colored square per entry
    pub fn to_html(&self) -> String {
        let mut html = String::from("<div class=\"info legend\">");
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style='background: {}'></i> {}",
                entry.color, entry.lower
            ));
            match entry.upper {
                Some(upper) => html.push_str(&format!("&ndash;{}<br>", upper)),
                None => html.push('+'),
            }
        }
        html.push_str("</div>");
        html
    }
}

#[test]
fn test_legend_entries() {
    let legend = build_legend();
    assert_eq!(legend.position, ControlPosition::BottomRight);
    assert_eq!(legend.entries.len(), 6);
    let labels: Vec<&str> = legend.entries.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(
        labels,
        vec!["-10–10", "10–30", "30–50", "50–70", "70–90", "90+"]
    );
    let last = legend.entries.last().unwrap();
    assert!(last.label.ends_with('+'));
    assert_eq!(last.upper, None);
    for (entry, next) in legend.entries.iter().zip(legend.entries.iter().skip(1)) {
        assert_eq!(entry.upper, Some(next.lower));
        assert_eq!(entry.label, format!("{}–{}", entry.lower, next.lower));
    }
}

#[test]
fn test_legend_shares_depth_table() {
    use crate::core::classify::color_for_depth;

    let legend = build_legend();
    for (entry, bucket) in legend.entries.iter().zip(DEPTH_BUCKETS.iter()) {
        assert_eq!(entry.lower, bucket.lower);
        assert_eq!(entry.color, bucket.color);
        // just above the lower bound falls into the entry's color
        assert_eq!(color_for_depth(entry.lower + 0.5), entry.color);
    }
}

#[test]
fn test_legend_html() {
    let html = build_legend().to_html();
    assert!(html.starts_with("<div class=\"info legend\">"));
    assert!(html.contains("<i style='background: #98ee00'></i> -10&ndash;10<br>"));
    assert!(html.ends_with("<i style='background: #ea2c2c'></i> 90+</div>"));
}
