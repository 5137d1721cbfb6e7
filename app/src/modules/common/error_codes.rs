/// a carrapato could not be created because its codigo serial
/// is already used by another carrapato
pub static CODIGO_SERIAL_IN_USE: &str = "CODIGO_SERIAL_IN_USE";

/// a carrapato update request tried to change the codigo serial,
/// which is immutable after creation
pub static CODIGO_SERIAL_IMMUTABLE: &str = "CODIGO_SERIAL_IMMUTABLE";

/// a required field was missing or empty
pub static REQUIRED: &str = "Required";

/// a text field is longer than allowed
pub static MAX_LENGTH: &str = "MaxLength";

/// a numeric field must be greater than zero
pub static MUST_BE_POSITIVE: &str = "MustBePositive";

/// a coordinate is outside of its valid range
pub static OUT_OF_RANGE: &str = "OutOfRange";
