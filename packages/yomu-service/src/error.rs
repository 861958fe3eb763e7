pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Remote call failed: {message}")]
	Remote { message: String },
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Not signed in.")]
	Unauthenticated,
}
impl From<yomu_providers::Error> for Error {
	fn from(err: yomu_providers::Error) -> Self {
		match err {
			yomu_providers::Error::Unauthenticated { .. } => Self::Unauthenticated,
			yomu_providers::Error::NonStringHeader { name } => Self::InvalidRequest {
				message: format!("default header {name} must be a string."),
			},
			other => Self::Remote { message: other.to_string() },
		}
	}
}
