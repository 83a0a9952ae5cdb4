mod mat4;
mod quat;
mod vec3;

pub use mat4::*;
pub use quat::*;
pub use vec3::*;
