use crate::icons::ThumbIcon;

use super::{SlideGeometry, SlideToPayDefaults};

/// Values derived from the drag offset, recomputed on every change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideVisuals {
    /// Clamped thumb travel.
    pub offset: f32,
    /// Whether a release at this offset would commit.
    pub committed: bool,
    /// Glyph to show.
    pub icon: ThumbIcon,
    /// Label opacity in `[0, 1]`.
    pub label_opacity: f32,
    /// Scale the thumb should settle at.
    pub target_scale: f32,
}

/// Label opacity for a thumb at `offset`.
///
/// Fades linearly from 1 at rest to 0 at the threshold offset, then back up
/// to 1 at the end of the track.
pub fn label_opacity(offset: f32, geometry: &SlideGeometry) -> f32 {
    let offset = f64::from(offset);
    let threshold = geometry.exact_threshold_offset();
    let max = geometry.travel();
    let opacity = if offset <= threshold {
        1.0 - offset / threshold
    } else {
        (offset - threshold) / (max - threshold)
    };
    opacity.clamp(0.0, 1.0) as f32
}

/// Derives the thumb and label state from a raw offset.
///
/// `pressed` is whether a finger is currently on the thumb.
pub fn derive_visuals(offset: f32, geometry: &SlideGeometry, pressed: bool) -> SlideVisuals {
    let offset = geometry.clamp_offset(offset);
    let committed = geometry.is_past_threshold(offset);
    SlideVisuals {
        offset,
        committed,
        icon: if committed {
            ThumbIcon::Check
        } else {
            ThumbIcon::Arrow
        },
        label_opacity: label_opacity(offset, geometry),
        target_scale: if pressed && !committed {
            SlideToPayDefaults::PRESSED_SCALE
        } else {
            1.0
        },
    }
}

#[cfg(test)]
mod tests {
    use slidepay_ui::Dp;

    use super::*;

    fn geometry(threshold: f64) -> SlideGeometry {
        SlideGeometry {
            width: Dp(255.0),
            height: Dp(70.0),
            thumb_width: Dp(55.0),
            threshold,
        }
    }

    #[test]
    fn test_committed_is_strictly_past_threshold() {
        for threshold in [0.05, 0.3, 0.7, 0.95] {
            let geometry = geometry(threshold);
            let at = geometry.threshold_offset();
            assert!(!derive_visuals(at, &geometry, true).committed);
            assert!(derive_visuals(at + 0.01, &geometry, true).committed);
            assert!(!derive_visuals(at - 0.01, &geometry, true).committed);
            assert!(!derive_visuals(0.0, &geometry, true).committed);
            assert!(derive_visuals(geometry.max_offset(), &geometry, true).committed);
        }
    }

    #[test]
    fn test_threshold_near_one_commits_at_track_end() {
        let geometry = geometry(0.999_999_99);
        let visuals = derive_visuals(geometry.max_offset(), &geometry, true);
        assert!(visuals.committed);
        assert_eq!(visuals.icon, ThumbIcon::Check);
        assert_eq!(visuals.label_opacity, 1.0);
        assert!(!derive_visuals(199.9, &geometry, true).committed);
    }

    #[test]
    fn test_icon_follows_commit() {
        let geometry = geometry(0.7);
        assert_eq!(derive_visuals(10.0, &geometry, true).icon, ThumbIcon::Arrow);
        assert_eq!(derive_visuals(150.0, &geometry, true).icon, ThumbIcon::Check);
        assert_eq!(derive_visuals(130.0, &geometry, true).icon, ThumbIcon::Arrow);
    }

    #[test]
    fn test_label_opacity_shape() {
        let geometry = geometry(0.7);
        let threshold = geometry.threshold_offset();
        let max = geometry.max_offset();
        assert_eq!(label_opacity(0.0, &geometry), 1.0);
        assert_eq!(label_opacity(threshold, &geometry), 0.0);
        assert!((label_opacity(max, &geometry) - 1.0).abs() < 1e-6);
        assert!((label_opacity(threshold / 2.0, &geometry) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_label_opacity_is_continuous_and_bounded() {
        let geometry = geometry(0.7);
        let max = geometry.max_offset();
        let steps = 2000;
        let mut previous = label_opacity(0.0, &geometry);
        for i in 1..=steps {
            let offset = max * i as f32 / steps as f32;
            let opacity = label_opacity(offset, &geometry);
            assert!((0.0..=1.0).contains(&opacity));
            assert!((opacity - previous).abs() < 0.01, "jump at offset {offset}");
            previous = opacity;
        }
    }

    #[test]
    fn test_scale_target() {
        let geometry = geometry(0.7);
        assert_eq!(derive_visuals(50.0, &geometry, true).target_scale, 0.95);
        assert_eq!(derive_visuals(180.0, &geometry, true).target_scale, 1.0);
        assert_eq!(derive_visuals(50.0, &geometry, false).target_scale, 1.0);
    }

    #[test]
    fn test_offset_is_clamped() {
        let geometry = geometry(0.7);
        assert_eq!(derive_visuals(-20.0, &geometry, true).offset, 0.0);
        assert_eq!(derive_visuals(999.0, &geometry, true).offset, 200.0);
    }
}
