//! STAR column labels as constants for type safety.

/// Particle image identity: frame index combined with the stack path (`000001@stack.mrcs`)
pub const IMAGE_NAME: &str = "rlnImageName";
/// Source micrograph path
pub const MICROGRAPH_NAME: &str = "rlnMicrographName";
/// Particle X coordinate on the micrograph, in pixels
pub const COORDINATE_X: &str = "rlnCoordinateX";
/// Particle Y coordinate on the micrograph, in pixels
pub const COORDINATE_Y: &str = "rlnCoordinateY";
/// In-plane rotation angle psi, in degrees
pub const ANGLE_PSI: &str = "rlnAnglePsi";
/// 2D/3D class assignment
pub const CLASS_NUMBER: &str = "rlnClassNumber";
/// Defocus along the major axis, in angstroms
pub const DEFOCUS_U: &str = "rlnDefocusU";
/// Optics group a particle belongs to (3.1 and newer)
pub const OPTICS_GROUP: &str = "rlnOpticsGroup";

// Origin shifts: pre-3.1 files store pixels, 3.1 files angstroms.
/// Refined X origin shift in pixels (3.0 and older)
pub const ORIGIN_X: &str = "rlnOriginX";
/// Refined Y origin shift in pixels (3.0 and older)
pub const ORIGIN_Y: &str = "rlnOriginY";
/// Refined X origin shift in angstroms (3.1 and newer)
pub const ORIGIN_X_ANGST: &str = "rlnOriginXAngst";
/// Refined Y origin shift in angstroms (3.1 and newer)
pub const ORIGIN_Y_ANGST: &str = "rlnOriginYAngst";

// Per-row instrument columns of 3.0-era files.
/// Physical detector pixel size in micrometers (3.0 and older)
pub const DETECTOR_PIXEL_SIZE: &str = "rlnDetectorPixelSize";
/// Nominal magnification (3.0 and older)
pub const MAGNIFICATION: &str = "rlnMagnification";

// data_optics block fields of 3.1-era files.
/// Pixel size of the raw micrographs, in angstroms
pub const MICROGRAPH_ORIGINAL_PIXEL_SIZE: &str = "rlnMicrographOriginalPixelSize";
/// Pixel size of the extracted particle images, in angstroms
pub const IMAGE_PIXEL_SIZE: &str = "rlnImagePixelSize";
/// Particle box size in pixels
pub const IMAGE_SIZE: &str = "rlnImageSize";
/// Image dimensionality (2 or 3)
pub const IMAGE_DIMENSIONALITY: &str = "rlnImageDimensionality";
/// Acceleration voltage in kV
pub const VOLTAGE: &str = "rlnVoltage";
/// Spherical aberration in millimeters
pub const SPHERICAL_ABERRATION: &str = "rlnSphericalAberration";
/// Amplitude contrast fraction
pub const AMPLITUDE_CONTRAST: &str = "rlnAmplitudeContrast";
