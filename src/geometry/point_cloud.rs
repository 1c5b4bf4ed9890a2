use super::{Extent, Point3D};

use std::collections::BTreeMap;
use std::ops::Index;

/// Name of the per-point ground flag channel, 0: not ground, 1: ground
pub const GROUND_CHANNEL: &str = "is_ground";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum GroundLabel {
    #[default]
    NotGround = 0,
    Ground = 1,
}

impl GroundLabel {
    pub fn is_ground(self) -> bool {
        self == GroundLabel::Ground
    }
}

impl From<u8> for GroundLabel {
    fn from(v: u8) -> Self {
        if v == 0 {
            GroundLabel::NotGround
        } else {
            GroundLabel::Ground
        }
    }
}

/// Fixed layout points with a side table of optional per-point byte channels
#[derive(Clone, Debug)]
pub struct PointCloud {
    pub points: Vec<Point3D>,
    pub bounds: Extent,
    channels: BTreeMap<String, Vec<u8>>,
}

impl PointCloud {
    pub fn new(v: Vec<Point3D>, b: Extent) -> Self {
        Self {
            points: v,
            bounds: b,
            channels: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Add a zeroed channel or reset an existing one to zero
    pub fn declare_channel(&mut self, name: &str) -> &mut [u8] {
        let len = self.points.len();
        let channel = self.channels.entry(name.to_string()).or_default();
        channel.clear();
        channel.resize(len, 0);
        channel
    }

    pub fn channel(&self, name: &str) -> Option<&[u8]> {
        self.channels.get(name).map(Vec::as_slice)
    }

    pub fn ground_labels(&self) -> Option<impl Iterator<Item = GroundLabel> + '_> {
        self.channel(GROUND_CHANNEL)
            .map(|c| c.iter().map(|&v| GroundLabel::from(v)))
    }

    /// The points flagged as ground, empty if the cloud is not classified
    pub fn ground_points(&self) -> Vec<Point3D> {
        match self.ground_labels() {
            Some(labels) => self
                .points
                .iter()
                .zip(labels)
                .filter_map(|(p, l)| l.is_ground().then_some(*p))
                .collect(),
            None => vec![],
        }
    }
}

impl Index<usize> for PointCloud {
    type Output = Point3D;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_channel() {
        let points = vec![
            Point3D::new(0., 0., 0.),
            Point3D::new(1., 0., 3.),
            Point3D::new(0., 1., 1.),
        ];
        let bounds = Extent::from_points(&points).unwrap();
        let mut pc = PointCloud::new(points, bounds);

        assert!(pc.ground_labels().is_none());
        assert!(pc.ground_points().is_empty());

        let flags = pc.declare_channel(GROUND_CHANNEL);
        flags[0] = GroundLabel::Ground as u8;
        flags[2] = GroundLabel::Ground as u8;

        assert_eq!(pc.ground_points(), vec![pc[0], pc[2]]);

        // declaring again resets the flags
        pc.declare_channel(GROUND_CHANNEL);
        assert!(pc.ground_points().is_empty());
        assert_eq!(pc.channel(GROUND_CHANNEL).unwrap().len(), 3);
    }
}
