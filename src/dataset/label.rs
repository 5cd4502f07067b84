use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Axis-aligned 2D box in pixel coordinates, stored as (xmin, ymin, xmax, ymax)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box2D {
    pub xmin: f64,
    pub ymin: f64,
    pub xmax: f64,
    pub ymax: f64,
}

impl Box2D {
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Self {
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// Build a box from its top-left corner and size
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(x, y, x + width, y + height)
    }

    /// All four corners are finite numbers
    pub fn is_finite(&self) -> bool {
        [self.xmin, self.ymin, self.xmax, self.ymax]
            .iter()
            .all(|v| v.is_finite())
    }

    pub fn width(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f64 {
        self.ymax - self.ymin
    }

    pub fn area(&self) -> f64 {
        self.width().max(0.0) * self.height().max(0.0)
    }

    /// Intersection over union with another box, 0.0 when both are degenerate
    pub fn iou(&self, other: &Box2D) -> f64 {
        let ix = (self.xmax.min(other.xmax) - self.xmin.max(other.xmin)).max(0.0);
        let iy = (self.ymax.min(other.ymax) - self.ymin.max(other.ymin)).max(0.0);
        let intersection = ix * iy;
        let union = self.area() + other.area() - intersection;
        if union <= 0.0 {
            return 0.0;
        }
        intersection / union
    }
}

/// Value of a single label attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Boolean(bool),
    Integer(i64),
    Text(String),
}

impl AttributeValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Boolean(b) => write!(f, "{}", b),
            AttributeValue::Integer(i) => write!(f, "{}", i),
            AttributeValue::Text(s) => write!(f, "{:?}", s),
        }
    }
}

/// A 2D box with its category, attributes and tracking instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledBox2D {
    #[serde(flatten)]
    pub bbox: Box2D,
    pub category: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl LabeledBox2D {
    pub fn new(bbox: Box2D, category: impl Into<String>) -> Self {
        Self {
            bbox,
            category: category.into(),
            attributes: BTreeMap::new(),
            instance: None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn is_occluded(&self) -> bool {
        self.flag("occluded")
    }

    pub fn is_truncated(&self) -> bool {
        self.flag("truncated")
    }

    pub fn is_difficult(&self) -> bool {
        self.flag("difficult")
    }

    pub fn pose(&self) -> Option<&str> {
        self.attribute("pose").and_then(AttributeValue::as_str)
    }

    fn flag(&self, name: &str) -> bool {
        self.attribute(name)
            .and_then(AttributeValue::as_bool)
            .unwrap_or(false)
    }
}

/// Labels attached to one image. `box2d` is `None` for unannotated data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub box2d: Option<Vec<LabeledBox2D>>,
}

impl Label {
    pub fn is_annotated(&self) -> bool {
        self.box2d.is_some()
    }

    /// Boxes of this label, empty for unannotated data
    pub fn boxes(&self) -> &[LabeledBox2D] {
        self.box2d.as_deref().unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xywh() {
        let bbox = Box2D::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(bbox, Box2D::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(bbox.width(), 30.0);
        assert_eq!(bbox.height(), 40.0);
        assert_eq!(bbox.area(), 1200.0);
    }

    #[test]
    fn test_from_xywh_overflow_is_not_finite() {
        assert!(Box2D::from_xywh(1.0, 2.0, 3.0, 4.0).is_finite());

        let overflow = Box2D::from_xywh(1e308, 0.0, 1e308, 1.0);
        assert!(overflow.xmax.is_infinite());
        assert!(!overflow.is_finite());
    }

    #[test]
    fn test_iou() {
        let a = Box2D::new(0.0, 0.0, 10.0, 10.0);
        let b = Box2D::new(5.0, 0.0, 15.0, 10.0);
        assert!((a.iou(&b) - 50.0 / 150.0).abs() < 1e-9);
        assert_eq!(a.iou(&a), 1.0);

        let far = Box2D::new(100.0, 100.0, 110.0, 110.0);
        assert_eq!(a.iou(&far), 0.0);

        let point = Box2D::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(point.iou(&point), 0.0);
    }

    #[test]
    fn test_flags_default_to_false() {
        let mut labeled = LabeledBox2D::new(Box2D::from_xywh(0.0, 0.0, 1.0, 1.0), "pedestrian");
        assert!(!labeled.is_occluded());
        assert!(labeled.pose().is_none());

        labeled
            .attributes
            .insert("occluded".to_string(), AttributeValue::Boolean(true));
        labeled
            .attributes
            .insert("pose".to_string(), AttributeValue::Text("left".to_string()));
        assert!(labeled.is_occluded());
        assert!(!labeled.is_truncated());
        assert_eq!(labeled.pose(), Some("left"));
    }

    #[test]
    fn test_unannotated_label_has_no_boxes() {
        let label = Label::default();
        assert!(!label.is_annotated());
        assert!(label.boxes().is_empty());
    }

    #[test]
    fn test_labeled_box_json_shape() {
        let mut labeled = LabeledBox2D::new(Box2D::new(1.0, 2.0, 3.0, 4.0), "ignore");
        labeled.instance = Some("17".to_string());

        let value = serde_json::to_value(&labeled).unwrap();
        assert_eq!(value["xmin"], 1.0);
        assert_eq!(value["ymax"], 4.0);
        assert_eq!(value["category"], "ignore");
        assert_eq!(value["instance"], "17");
        assert!(value.get("attributes").is_none());
    }
}
