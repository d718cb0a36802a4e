use bendy_planner::Obstacle;
use nalgebra::{vector, Vector2};
use serde::{Deserialize, Serialize};

/// An obstacle drifting at constant velocity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleBody {
    pub obstacle: Obstacle,
    pub velocity: Vector2<f64>,
}

impl ObstacleBody {
    pub fn fixed(obstacle: Obstacle) -> ObstacleBody {
        ObstacleBody {
            obstacle,
            velocity: vector![0.0, 0.0],
        }
    }

    pub fn moving(obstacle: Obstacle, velocity: Vector2<f64>) -> ObstacleBody {
        ObstacleBody { obstacle, velocity }
    }

    pub fn tick(&mut self, dt: f64) {
        if self.velocity != Vector2::zeros() {
            self.obstacle.translate(&(self.velocity * dt));
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::point;
    use test_log::test;

    #[test]
    fn test_moving_body() {
        let mut body = ObstacleBody::moving(
            Obstacle::segment(point![0.0, 0.0], point![0.0, 4.0], 0.5),
            vector![2.0, -1.0],
        );
        for _ in 0..10 {
            body.tick(0.1);
        }
        match body.obstacle {
            Obstacle::Segment { p1, p2, .. } => {
                assert_abs_diff_eq!(p1, point![2.0, -1.0], epsilon = 1e-9);
                assert_abs_diff_eq!(p2, point![2.0, 3.0], epsilon = 1e-9);
            }
            Obstacle::Circle { .. } => unreachable!(),
        }
    }

    #[test]
    fn test_fixed_body() {
        let circle = Obstacle::circle(point![1.0, 1.0], 2.0);
        let mut body = ObstacleBody::fixed(circle);
        body.tick(1.0);
        assert_eq!(body.obstacle, circle);
    }
}
