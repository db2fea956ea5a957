//! Device identification and location-services status

use crate::core::error::Result;
use tracing::info;

/// Marketing name for a hardware model identifier such as `"iPhone9,1"`.
///
/// Unknown identifiers are returned unchanged.
pub fn model_name(identifier: &str) -> &str {
    match identifier {
        "iPod5,1" => "iPod Touch 5",
        "iPod7,1" => "iPod Touch 6",
        "iPhone3,1" | "iPhone3,2" | "iPhone3,3" => "iPhone 4",
        "iPhone4,1" => "iPhone 4s",
        "iPhone5,1" | "iPhone5,2" => "iPhone 5",
        "iPhone5,3" | "iPhone5,4" => "iPhone 5c",
        "iPhone6,1" | "iPhone6,2" => "iPhone 5s",
        "iPhone7,2" => "iPhone 6",
        "iPhone7,1" => "iPhone 6 Plus",
        "iPhone8,1" => "iPhone 6s",
        "iPhone8,2" => "iPhone 6s Plus",
        "iPhone9,1" | "iPhone9,3" => "iPhone 7",
        "iPhone9,2" | "iPhone9,4" => "iPhone 7 Plus",
        "iPhone8,4" => "iPhone SE",
        "iPad2,1" | "iPad2,2" | "iPad2,3" | "iPad2,4" => "iPad 2",
        "iPad3,1" | "iPad3,2" | "iPad3,3" => "iPad 3",
        "iPad3,4" | "iPad3,5" | "iPad3,6" => "iPad 4",
        "iPad4,1" | "iPad4,2" | "iPad4,3" => "iPad Air",
        "iPad5,3" | "iPad5,4" => "iPad Air 2",
        "iPad6,11" | "iPad6,12" => "iPad 5",
        "iPad2,5" | "iPad2,6" | "iPad2,7" => "iPad Mini",
        "iPad4,4" | "iPad4,5" | "iPad4,6" => "iPad Mini 2",
        "iPad4,7" | "iPad4,8" | "iPad4,9" => "iPad Mini 3",
        "iPad5,1" | "iPad5,2" => "iPad Mini 4",
        "iPad6,3" | "iPad6,4" => "iPad Pro 9.7 Inch",
        "iPad6,7" | "iPad6,8" => "iPad Pro 12.9 Inch",
        "iPad7,1" | "iPad7,2" => "iPad Pro 12.9 Inch 2. Generation",
        "iPad7,3" | "iPad7,4" => "iPad Pro 10.5 Inch",
        "AppleTV5,3" => "Apple TV",
        "i386" | "x86_64" => "Simulator",
        other => other,
    }
}

/// Machine field of `uname(2)`, e.g. `x86_64` or `iPhone9,1`.
pub fn machine_identifier() -> Result<String> {
    let info = nix::sys::utsname::uname()?;
    Ok(info.machine().to_string_lossy().into_owned())
}

/// Marketing name of the machine this process runs on.
pub fn current_model_name() -> Result<String> {
    let identifier = machine_identifier()?;
    Ok(model_name(&identifier).to_string())
}

/// Location authorization granted to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum AuthorizationStatus {
    NotDetermined,
    Restricted,
    Denied,
    AuthorizedAlways,
    AuthorizedWhenInUse,
}

impl AuthorizationStatus {
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::AuthorizedAlways | Self::AuthorizedWhenInUse)
    }
}

/// Whether location data is usable: the system service must be on and the
/// app must hold one of the authorized statuses.
pub fn location_services_enabled(service_enabled: bool, status: AuthorizationStatus) -> bool {
    if !service_enabled {
        info!("Location services are not enabled");
        return false;
    }

    let authorized = status.is_authorized();
    if authorized {
        info!(%status, "Location access granted");
    } else {
        info!(%status, "No location access");
    }
    authorized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_name_known() {
        assert_eq!(model_name("iPhone9,1"), "iPhone 7");
        assert_eq!(model_name("iPhone9,4"), "iPhone 7 Plus");
        assert_eq!(model_name("iPad6,11"), "iPad 5");
        assert_eq!(model_name("iPad7,1"), "iPad Pro 12.9 Inch 2. Generation");
        assert_eq!(model_name("AppleTV5,3"), "Apple TV");
        assert_eq!(model_name("x86_64"), "Simulator");
    }

    #[test]
    fn test_model_name_passthrough() {
        assert_eq!(model_name("iPhone99,9"), "iPhone99,9");
        assert_eq!(model_name(""), "");
        assert_eq!(model_name("aarch64"), "aarch64");
    }

    #[test]
    fn test_machine_identifier_not_empty() {
        let identifier = machine_identifier().unwrap();
        assert!(!identifier.is_empty());
        assert_eq!(current_model_name().unwrap(), model_name(&identifier));
    }

    #[test]
    fn test_location_services_disabled_overrides_status() {
        assert!(!location_services_enabled(false, AuthorizationStatus::AuthorizedAlways));
    }

    #[test]
    fn test_location_services_statuses() {
        for status in [
            AuthorizationStatus::NotDetermined,
            AuthorizationStatus::Restricted,
            AuthorizationStatus::Denied,
        ] {
            assert!(!location_services_enabled(true, status), "{status}");
        }
        for status in [
            AuthorizationStatus::AuthorizedAlways,
            AuthorizationStatus::AuthorizedWhenInUse,
        ] {
            assert!(location_services_enabled(true, status), "{status}");
        }
    }

    #[test]
    fn test_authorization_status_parse() {
        assert_eq!(
            "authorized-when-in-use".parse::<AuthorizationStatus>().unwrap(),
            AuthorizationStatus::AuthorizedWhenInUse
        );
        assert_eq!(AuthorizationStatus::NotDetermined.to_string(), "not-determined");
        assert!("granted".parse::<AuthorizationStatus>().is_err());
    }
}
