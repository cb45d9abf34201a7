pub mod aruco_tag;
pub mod camera;
pub mod employee;
pub mod location;
pub mod motorcycle;
pub mod status_record;
pub mod yard;
