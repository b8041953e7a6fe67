use std::fmt;
use std::str::FromStr;

/// Canned ACLs accepted when creating a bucket
/// <https://docs.aws.amazon.com/AmazonS3/latest/userguide/acl-overview.html#canned-acl>
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CannedAcl {
    #[default]
    Private,
    PublicRead,
    PublicReadWrite,
    AuthenticatedRead,
}

impl CannedAcl {
    pub const VALUES: [&'static str; 4] = [
        "private",
        "public-read",
        "public-read-write",
        "authenticated-read",
    ];

    /// Value of the `x-amz-acl` header
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::PublicRead => "public-read",
            Self::PublicReadWrite => "public-read-write",
            Self::AuthenticatedRead => "authenticated-read",
        }
    }
}

impl fmt::Display for CannedAcl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CannedAcl {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(Self::Private),
            "public-read" => Ok(Self::PublicRead),
            "public-read-write" => Ok(Self::PublicReadWrite),
            "authenticated-read" => Ok(Self::AuthenticatedRead),
            _ => Err(format!(
                "invalid acl: {s}, expected one of: {}",
                Self::VALUES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        for value in CannedAcl::VALUES {
            let acl: CannedAcl = value.parse().unwrap();
            assert_eq!(acl.as_str(), value);
            assert_eq!(acl.to_string(), value);
        }
    }

    #[test]
    fn test_invalid() {
        assert!("Private".parse::<CannedAcl>().is_err());
        assert!("bucket-owner-full-control".parse::<CannedAcl>().is_err());
        assert!("".parse::<CannedAcl>().is_err());
    }

    #[test]
    fn test_default() {
        assert_eq!(CannedAcl::default(), CannedAcl::Private);
    }
}
