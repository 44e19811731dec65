//! Render output
//!
//! Widgets describe what to draw as a small [`View`] tree. The host owns
//! layout, text shaping and painting; values here are already animated, so a
//! host only has to draw the tree it is handed each frame.

use comps_animation::SpinnerFrame;
use comps_core::Color;
use serde::{Deserialize, Serialize};

/// Fill behind a surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Background {
    Solid { color: Color },
    VerticalGradient { top: Color, bottom: Color },
}

impl Background {
    pub fn solid(color: Color) -> Self {
        Background::Solid { color }
    }

    pub fn vertical_gradient(top: Color, bottom: Color) -> Self {
        Background::VerticalGradient { top, bottom }
    }
}

/// A node in the render tree
#[derive(Clone, Debug, PartialEq)]
pub enum View {
    /// Rounded, optionally elevated container with a single child
    Surface {
        background: Background,
        /// (horizontal, vertical)
        padding: (f32, f32),
        corner_radius: f32,
        elevation: f32,
        child: Box<View>,
    },
    /// Children laid out horizontally, vertically centered
    Row {
        children: Vec<View>,
        spacing: f32,
        opacity: f32,
    },
    /// Children drawn on top of each other, centered; sized to the largest
    Stack { children: Vec<View>, opacity: f32 },
    /// Clips its child to its own bounds
    Clip { child: Box<View> },
    Text {
        content: String,
        color: Color,
        opacity: f32,
        /// Vertical offset in units of the text's own height
        translate_y: f32,
    },
    /// Filled circle
    Dot {
        diameter: f32,
        color: Color,
        opacity: f32,
        /// Vertical offset in layout units
        translate_y: f32,
    },
    /// Indeterminate circular progress arc
    Spinner {
        diameter: f32,
        stroke_width: f32,
        frame: SpinnerFrame,
        color: Color,
    },
    /// Host-resolved icon
    Icon { name: String, tint: Color },
}

impl View {
    pub fn text(content: impl Into<String>, color: Color) -> Self {
        View::Text {
            content: content.into(),
            color,
            opacity: 1.0,
            translate_y: 0.0,
        }
    }

    pub fn row(children: Vec<View>) -> Self {
        View::Row {
            children,
            spacing: 0.0,
            opacity: 1.0,
        }
    }

    pub fn stack(children: Vec<View>) -> Self {
        View::Stack {
            children,
            opacity: 1.0,
        }
    }

    /// Own opacity of this node (1.0 for nodes without one)
    pub fn opacity(&self) -> f32 {
        match self {
            View::Row { opacity, .. }
            | View::Stack { opacity, .. }
            | View::Text { opacity, .. }
            | View::Dot { opacity, .. } => *opacity,
            View::Surface { .. } | View::Clip { .. } | View::Spinner { .. } | View::Icon { .. } => 1.0,
        }
    }

    pub fn children(&self) -> &[View] {
        match self {
            View::Row { children, .. } | View::Stack { children, .. } => children,
            View::Surface { child, .. } | View::Clip { child } => std::slice::from_ref(child.as_ref()),
            View::Text { .. } | View::Dot { .. } | View::Spinner { .. } | View::Icon { .. } => &[],
        }
    }

    /// Every node in breadth-first order, starting with `self`
    pub fn descendants(&self) -> Vec<&View> {
        let mut out = vec![self];
        let mut i = 0;
        while i < out.len() {
            let node = out[i];
            out.extend(node.children());
            i += 1;
        }
        out
    }

    /// Concatenated text of every node that would be visible (non-zero
    /// opacity along its whole path). Separators and digits come out in
    /// reading order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if self.opacity() <= 0.0 {
            return;
        }
        if let View::Text { content, .. } = self {
            out.push_str(content);
        }
        for child in self.children() {
            child.collect_text(out);
        }
    }
}
