//! Arrow geometry for the wind direction panel.
//!
//! Arrows start on the x axis at the row's index and point along the wind
//! angle, measured counter-clockwise from the positive x axis. Their length is
//! the wind speed divided by the arrow scale.

/// Head barb length relative to the shaft.
const HEAD_LENGTH_RATIO: f64 = 0.25;
/// Angle between each barb and the reversed shaft, in degrees.
const HEAD_ANGLE_DEG: f64 = 25.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arrow {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Arrow {
    pub fn tip(&self) -> (f64, f64) {
        (self.x + self.dx, self.y + self.dy)
    }

    pub fn length(&self) -> f64 {
        self.dx.hypot(self.dy)
    }

    /// End points of the two head barbs.
    pub fn barbs(&self) -> [(f64, f64); 2] {
        let (tip_x, tip_y) = self.tip();
        let back = self.dy.atan2(self.dx) + std::f64::consts::PI;
        let len = self.length() * HEAD_LENGTH_RATIO;
        let spread = HEAD_ANGLE_DEG.to_radians();
        [back - spread, back + spread].map(|a| (tip_x + len * a.cos(), tip_y + len * a.sin()))
    }
}

/// Builds one arrow per row with both an angle and a speed.
///
/// Rows missing either value, and rows with zero speed, produce no arrow.
pub fn arrows(angles: &[Option<f64>], speeds: &[Option<f64>], scale: f64) -> Vec<Arrow> {
    angles
        .iter()
        .zip(speeds)
        .enumerate()
        .filter_map(|(i, pair)| match pair {
            (Some(angle), Some(speed)) if *speed != 0.0 => {
                let radians = angle.to_radians();
                Some(Arrow {
                    x: i as f64,
                    y: 0.0,
                    dx: radians.cos() * speed / scale,
                    dy: radians.sin() * speed / scale,
                })
            }
            _ => None,
        })
        .collect()
}

/// Flattens arrows into a single polyline of shaft and barb segments.
///
/// Segments are separated by `None`, which plotting backends draw as a gap.
pub fn polyline(arrows: &[Arrow]) -> (Vec<Option<f64>>, Vec<Option<f64>>) {
    let mut xs = Vec::with_capacity(arrows.len() * 9);
    let mut ys = Vec::with_capacity(arrows.len() * 9);
    for arrow in arrows {
        let tip = arrow.tip();
        let mut segment = |from: (f64, f64), to: (f64, f64)| {
            xs.extend([Some(from.0), Some(to.0), None]);
            ys.extend([Some(from.1), Some(to.1), None]);
        };
        segment((arrow.x, arrow.y), tip);
        for barb in arrow.barbs() {
            segment(tip, barb);
        }
    }
    (xs, ys)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_arrow_components_follow_angle() {
        let arrows = arrows(
            &[Some(0.0), Some(90.0), Some(180.0)],
            &[Some(22.0), Some(11.0), Some(44.0)],
            22.0,
        );
        assert_eq!(arrows.len(), 3);

        assert!(close(arrows[0].dx, 1.0) && close(arrows[0].dy, 0.0));
        assert!(close(arrows[1].dx, 0.0) && close(arrows[1].dy, 0.5));
        assert!(close(arrows[2].dx, -2.0) && close(arrows[2].dy, 0.0));

        assert_eq!(arrows[1].x, 1.0);
        assert_eq!(arrows[2].y, 0.0);
    }

    #[test]
    fn test_missing_and_calm_rows_are_skipped() {
        let arrows = arrows(
            &[None, Some(45.0), Some(0.0), Some(270.0)],
            &[Some(10.0), None, Some(0.0), Some(22.0)],
            22.0,
        );
        assert_eq!(arrows.len(), 1);
        // The surviving arrow keeps its row position.
        assert_eq!(arrows[0].x, 3.0);
        assert!(close(arrows[0].dy, -1.0));
    }

    #[test]
    fn test_barbs_sit_behind_the_tip() {
        let arrow = Arrow {
            x: 0.0,
            y: 0.0,
            dx: 1.0,
            dy: 0.0,
        };
        let [upper, lower] = arrow.barbs();
        let spread = HEAD_ANGLE_DEG.to_radians();
        assert!(close(upper.0, 1.0 - 0.25 * spread.cos()));
        assert!(close(lower.0, upper.0));
        assert!(close(upper.1, -lower.1));
        assert!(close(upper.1.abs(), 0.25 * spread.sin()));
    }

    #[test]
    fn test_polyline_segments_are_gap_separated() {
        let arrow = Arrow {
            x: 2.0,
            y: 0.0,
            dx: 0.0,
            dy: 0.5,
        };
        let (xs, ys) = polyline(&[arrow, arrow]);
        // Shaft plus two barbs, three points each, per arrow.
        assert_eq!(xs.len(), 18);
        assert_eq!(ys.len(), 18);
        assert_eq!(xs[0], Some(2.0));
        assert_eq!(ys[1], Some(0.5));
        assert_eq!(xs[2], None);
        assert_eq!(ys[2], None);
        assert!(polyline(&[]).0.is_empty());
    }
}
