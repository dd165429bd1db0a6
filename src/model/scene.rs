use glam::{Quat, Vec3};
use tracing::info;

/// World gravity for the test arena. Doubled from the usual -9.81 so ramps
/// launch and land with arcade weight; injected into the physics world rather
/// than read from any ambient global.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -20.0, 0.0);

/// The ground plane is 200x200 units centered on the origin.
pub const ARENA_HALF_EXTENT: f32 = 100.0;

/// Where the ATV starts, slightly above the ground so it settles onto it.
pub const SPAWN_POSITION: Vec3 = Vec3::new(0.0, 2.0, 0.0);

/// Result of the downward ground probe. Recomputed every step, never cached.
#[derive(Debug, Clone, Copy)]
pub struct GroundHit {
    pub normal: Vec3,
    pub distance: f32,
}

/// Downward ray query against world geometry. Read-only and repeatable; the
/// vehicle controller and the physics world both run against this seam, and
/// tests substitute a flat plane.
pub trait GroundProbe {
    /// Cast a ray straight down from `origin`, returning the nearest hit
    /// within `max_dist`.
    fn cast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit>;
}

#[derive(Debug, Clone, Copy)]
pub enum Shape {
    /// Infinite-extent horizontal plane at the prop's y position.
    Plane,
    /// Oriented box with the given half extents.
    Box { half_extents: Vec3 },
}

/// A static piece of arena geometry.
#[derive(Debug, Clone)]
pub struct Prop {
    pub name: &'static str,
    pub shape: Shape,
    pub position: Vec3,
    pub rotation: Quat,
    /// Linear RGB, purely descriptive in the headless build.
    pub color: [f32; 3],
    pub solid: bool,
}

impl Prop {
    fn boxed(name: &'static str, position: Vec3, roll_deg: f32, size: Vec3, color: [f32; 3]) -> Self {
        Self {
            name,
            shape: Shape::Box { half_extents: size * 0.5 },
            position,
            rotation: Quat::from_rotation_z(roll_deg.to_radians()),
            color,
            solid: true,
        }
    }
}

/// Static world geometry plus the downward raycast the vehicle relies on.
pub struct Scene {
    pub props: Vec<Prop>,
}

impl Scene {
    pub fn new(props: Vec<Prop>) -> Self {
        Self { props }
    }

    /// Procedurally build the test arena: ground plane, three ramps color-coded
    /// by steepness, two boundary walls, three decorative trees.
    pub fn build_test_arena() -> Self {
        let gray = [0.5, 0.5, 0.5];
        let green = [0.2, 0.7, 0.2];
        let brown = [0.6, 0.4, 0.2];
        let red = [0.8, 0.1, 0.1];

        let mut props = vec![Prop {
            name: "ground",
            shape: Shape::Plane,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            color: gray,
            solid: true,
        }];

        // Ramps, gentlest first
        props.push(Prop::boxed("ramp_green", Vec3::new(0.0, 0.0, 20.0), 15.0, Vec3::new(10.0, 2.0, 3.0), green));
        props.push(Prop::boxed("ramp_brown", Vec3::new(-15.0, 0.0, 10.0), -25.0, Vec3::new(8.0, 3.0, 2.0), brown));
        props.push(Prop::boxed("ramp_red", Vec3::new(25.0, 0.0, -5.0), 45.0, Vec3::new(12.0, 4.0, 4.0), red));

        // Boundary walls
        props.push(Prop::boxed("wall_west", Vec3::new(-30.0, 1.0, 0.0), 0.0, Vec3::new(2.0, 2.0, 10.0), red));
        props.push(Prop::boxed("wall_east", Vec3::new(30.0, 1.0, 10.0), 0.0, Vec3::new(2.0, 2.0, 8.0), red));

        // Trees, placed away from the ramps
        for (i, pos) in [
            Vec3::new(-40.0, 1.0, -30.0),
            Vec3::new(35.0, 1.0, 25.0),
            Vec3::new(-25.0, 1.0, 40.0),
        ]
        .into_iter()
        .enumerate()
        {
            let name: &'static str = ["tree_0", "tree_1", "tree_2"][i];
            props.push(Prop::boxed(name, pos, 0.0, Vec3::new(0.5, 4.0, 0.5), green));
        }

        info!(props = props.len(), "built test arena");
        Self::new(props)
    }

    /// Ray/box in the box's local frame via the slab method. Returns entry
    /// distance and world-space entry normal.
    fn ray_box(origin: Vec3, dir: Vec3, prop: &Prop, half: Vec3) -> Option<(f32, Vec3)> {
        let inv_rot = prop.rotation.conjugate();
        let o = inv_rot * (origin - prop.position);
        let d = inv_rot * dir;

        let mut t_min = f32::NEG_INFINITY;
        let mut t_max = f32::INFINITY;
        let mut entry_axis = 0usize;
        let mut entry_sign = 1.0f32;

        for axis in 0..3 {
            let oa = o[axis];
            let da = d[axis];
            let ha = half[axis];
            if da.abs() < 1e-8 {
                if oa.abs() > ha {
                    return None;
                }
                continue;
            }
            let mut t1 = (-ha - oa) / da;
            let mut t2 = (ha - oa) / da;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }
            if t1 > t_min {
                t_min = t1;
                entry_axis = axis;
                // Entry is always through the face opposing the ray
                entry_sign = -da.signum();
            }
            t_max = t_max.min(t2);
            if t_min > t_max {
                return None;
            }
        }

        if t_max < 0.0 {
            return None;
        }
        let mut local_normal = Vec3::ZERO;
        local_normal[entry_axis] = entry_sign;
        Some((t_min.max(0.0), prop.rotation * local_normal))
    }
}

impl GroundProbe for Scene {
    fn cast_down(&self, origin: Vec3, max_dist: f32) -> Option<GroundHit> {
        let dir = Vec3::NEG_Y;
        let mut best: Option<GroundHit> = None;

        for prop in self.props.iter().filter(|p| p.solid) {
            let hit = match prop.shape {
                Shape::Plane => {
                    let height = origin.y - prop.position.y;
                    if height >= 0.0 {
                        Some((height, Vec3::Y))
                    } else {
                        None
                    }
                }
                Shape::Box { half_extents } => Self::ray_box(origin, dir, prop, half_extents),
            };

            if let Some((distance, normal)) = hit {
                if distance <= max_dist && best.map_or(true, |b| distance < b.distance) {
                    best = Some(GroundHit { normal, distance });
                }
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_hits_ground_plane() {
        let scene = Scene::build_test_arena();
        let hit = scene.cast_down(Vec3::new(0.0, 1.5, -40.0), 2.0).expect("over open ground");
        assert!((hit.distance - 1.5).abs() < 1e-5);
        assert!(hit.normal.abs_diff_eq(Vec3::Y, 1e-6));
    }

    #[test]
    fn probe_misses_beyond_ray_length() {
        let scene = Scene::build_test_arena();
        assert!(scene.cast_down(Vec3::new(0.0, 10.0, -40.0), 2.0).is_none());
    }

    #[test]
    fn probe_prefers_ramp_over_ground() {
        let scene = Scene::build_test_arena();
        // Directly above the green ramp's center: the ramp top is closer than
        // the plane and its normal is tilted by the 15 degree roll.
        let hit = scene.cast_down(Vec3::new(0.0, 3.0, 20.0), 5.0).expect("over ramp");
        assert!(hit.distance < 3.0, "ramp should be above the plane");
        let slope = hit.normal.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees();
        assert!((slope - 15.0).abs() < 1.0, "slope was {slope}");
    }

    #[test]
    fn steep_ramp_reads_45_degrees() {
        let scene = Scene::build_test_arena();
        let hit = scene.cast_down(Vec3::new(25.0, 6.0, -5.0), 10.0).expect("over red ramp");
        let slope = hit.normal.dot(Vec3::Y).clamp(-1.0, 1.0).acos().to_degrees();
        assert!((slope - 45.0).abs() < 1.0, "slope was {slope}");
    }
}
