pub(crate) mod kinematics;
pub(crate) mod pid;
