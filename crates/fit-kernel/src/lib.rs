//! Renderer-agnostic geometry for the fitting room: radius profiles,
//! surfaces of revolution, simple primitives and flat triangle buffers.

pub mod error;
pub mod geometry;
pub mod lathe;
pub mod mesh;
pub mod primitives;
pub mod profile;

pub use error::KernelError;
pub use geometry::{BoundingBox, Point3d, Vec3};
pub use lathe::revolve_profile;
pub use mesh::{mesh_to_obj, mesh_to_stl, TriangleMesh};
pub use primitives::{round_toe, segmented_box, tapered_cylinder, uv_sphere, ToeRounding};
pub use profile::{build_profile, Breakpoint, BreakpointTable, Profile, ProfileSample};
