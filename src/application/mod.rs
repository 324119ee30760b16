mod app_state;
mod camera;

pub use app_state::AppState;
pub use camera::OrbitCamera;
