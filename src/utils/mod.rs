pub mod dynamodb;
pub mod regid;
pub mod validation;
