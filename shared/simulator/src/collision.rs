use crate::agent::{Agent, ARRIVAL_RADIUS};
use crate::body::ObstacleBody;

/// What an agent touched this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Contact {
    None,
    Destination,
    /// Index of the obstacle body the agent hit.
    Obstacle(usize),
}

/// Checks one agent against its destination and every obstacle.
///
/// Hitting an obstacle takes precedence over arriving on the same tick.
pub fn check(agent: &Agent, bodies: &[ObstacleBody]) -> Contact {
    let hit = bodies
        .iter()
        .position(|body| body.obstacle.point_clearance(&agent.position) < agent.kinematics.radius);
    if let Some(index) = hit {
        return Contact::Obstacle(index);
    }
    if nalgebra::distance(&agent.position, &agent.destination) <= ARRIVAL_RADIUS {
        return Contact::Destination;
    }
    Contact::None
}

#[cfg(test)]
mod test {
    use super::*;
    use bendy_planner::Obstacle;
    use nalgebra::point;
    use test_log::test;

    #[test]
    fn test_contacts() {
        let bodies = [
            ObstacleBody::fixed(Obstacle::circle(point![10.0, 0.0], 2.0)),
            ObstacleBody::fixed(Obstacle::segment(point![0.0, 5.0], point![10.0, 5.0], 0.0)),
        ];

        let agent = Agent::new(point![0.0, 0.0], 0.0, point![20.0, 0.0]);
        assert_eq!(check(&agent, &bodies), Contact::None);

        let agent = Agent::new(point![7.6, 0.0], 0.0, point![20.0, 0.0]);
        assert_eq!(check(&agent, &bodies), Contact::Obstacle(0));

        let agent = Agent::new(point![3.0, 4.7], 0.0, point![20.0, 0.0]);
        assert_eq!(check(&agent, &bodies), Contact::Obstacle(1));

        let agent = Agent::new(point![19.7, 0.0], 0.0, point![20.0, 0.0]);
        assert_eq!(check(&agent, &bodies), Contact::Destination);
    }
}
