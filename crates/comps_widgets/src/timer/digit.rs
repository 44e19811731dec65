//! One animated digit cell

use comps_animation::ContentTransition;
use comps_core::Color;

use crate::view::View;

/// A single character that animates between its old and new value.
///
/// Each cell runs its own transition, so only the digits that actually
/// changed move on a tick.
#[derive(Clone, Debug)]
pub struct DigitCell {
    current: char,
    previous: Option<char>,
    transition: ContentTransition,
    elapsed_ms: f32,
}

impl DigitCell {
    pub fn new(digit: char, transition: ContentTransition) -> Self {
        Self {
            current: digit,
            previous: None,
            transition,
            elapsed_ms: 0.0,
        }
    }

    pub fn digit(&self) -> char {
        self.current
    }

    /// True while the old digit is still on its way out
    pub fn is_animating(&self) -> bool {
        self.previous.is_some()
    }

    /// Replace the digit. Returns false if it was unchanged.
    pub fn set(&mut self, digit: char) -> bool {
        if digit == self.current {
            return false;
        }
        self.previous = (!self.transition.is_instant()).then_some(self.current);
        self.current = digit;
        self.elapsed_ms = 0.0;
        true
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if self.previous.is_none() {
            return;
        }
        self.elapsed_ms += dt_ms;
        if self.elapsed_ms >= self.transition.duration_ms as f32 {
            self.previous = None;
        }
    }

    pub fn render(&self, color: Color) -> View {
        let frame = self.transition.frame(if self.previous.is_some() {
            self.elapsed_ms
        } else {
            self.transition.duration_ms as f32
        });

        let mut layers = Vec::with_capacity(2);
        if let (Some(previous), Some(outgoing)) = (self.previous, frame.outgoing) {
            layers.push(View::Text {
                content: previous.to_string(),
                color,
                opacity: outgoing.opacity,
                translate_y: outgoing.translate_y,
            });
        }
        layers.push(View::Text {
            content: self.current.to_string(),
            color,
            opacity: frame.incoming.opacity,
            translate_y: frame.incoming.translate_y,
        });

        View::Clip {
            child: Box::new(View::stack(layers)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimeAnimationKind;

    fn texts(view: &View) -> Vec<(String, f32)> {
        view.descendants()
            .into_iter()
            .filter_map(|v| match v {
                View::Text {
                    content,
                    translate_y,
                    ..
                } => Some((content.clone(), *translate_y)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_unchanged_digit_does_not_animate() {
        let mut cell = DigitCell::new('4', TimeAnimationKind::SlideTop.transition(500));
        assert!(!cell.set('4'));
        assert!(!cell.is_animating());
        assert_eq!(texts(&cell.render(Color::BLACK)), vec![("4".to_string(), 0.0)]);
    }

    #[test]
    fn test_change_plays_both_layers() {
        let mut cell = DigitCell::new('4', TimeAnimationKind::SlideTop.transition(500));
        assert!(cell.set('5'));
        cell.tick(250.0);

        let layers = texts(&cell.render(Color::BLACK));
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[0].0, "4");
        assert!(layers[0].1 > 0.0, "old digit leaves downward");
        assert_eq!(layers[1].0, "5");
        assert!(layers[1].1 < 0.0, "new digit arrives from above");

        cell.tick(250.0);
        assert!(!cell.is_animating());
        assert_eq!(cell.render(Color::BLACK).text_content(), "5");
    }

    #[test]
    fn test_instant_swap() {
        let mut cell = DigitCell::new('1', TimeAnimationKind::None.transition(500));
        cell.set('2');
        assert!(!cell.is_animating());
        assert_eq!(cell.render(Color::BLACK).text_content(), "2");
    }
}
