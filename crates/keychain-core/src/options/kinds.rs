//! Closed enums carried in item attributes
//!
//! Each enum converts to the store's attribute code and back. The forward
//! direction is total; the reverse returns `None` for codes outside the
//! known set, since the store may hold items written by other clients.

use serde::{Deserialize, Serialize};

macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $code:literal, $desc:literal;)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        $vis enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every variant, in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant,)+];

            /// Attribute code understood by the store
            pub const fn code(self) -> &'static str {
                match self {
                    $($name::$variant => $code,)+
                }
            }

            /// Display name used in item listings
            pub const fn description(self) -> &'static str {
                match self {
                    $($name::$variant => $desc,)+
                }
            }

            /// Reverse of [`Self::code`]
            pub fn from_code(code: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|v| v.code() == code)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.description())
            }
        }
    };
}

coded_enum! {
    /// Partition scheme an item belongs to
    pub enum ItemScope {
        /// Secret scoped by service name
        GenericService => "genp", "GenericPassword";
        /// Credential scoped by server, port, protocol and auth scheme
        NetworkCredential => "inet", "InternetPassword";
    }
}

coded_enum! {
    /// When a stored secret may be read, relative to device lock state,
    /// and whether it migrates to other devices through backups
    pub enum Accessibility {
        WhenUnlocked => "ak", "WhenUnlocked";
        AfterFirstUnlock => "ck", "AfterFirstUnlock";
        Always => "dk", "Always";
        WhenPasscodeSetThisDeviceOnly => "akpu", "WhenPasscodeSetThisDeviceOnly";
        WhenUnlockedThisDeviceOnly => "aku", "WhenUnlockedThisDeviceOnly";
        AfterFirstUnlockThisDeviceOnly => "cku", "AfterFirstUnlockThisDeviceOnly";
        AlwaysThisDeviceOnly => "dku", "AlwaysThisDeviceOnly";
    }
}

impl Default for Accessibility {
    fn default() -> Self {
        Self::AfterFirstUnlock
    }
}

coded_enum! {
    /// Network protocol of a network credential
    pub enum ProtocolKind {
        Ftp => "ftp ", "FTP";
        FtpAccount => "ftpa", "FTPAccount";
        Http => "http", "HTTP";
        Irc => "irc ", "IRC";
        Nntp => "nntp", "NNTP";
        Pop3 => "pop3", "POP3";
        Smtp => "smtp", "SMTP";
        Socks => "sox ", "SOCKS";
        Imap => "imap", "IMAP";
        Ldap => "ldap", "LDAP";
        AppleTalk => "atlk", "AppleTalk";
        Afp => "afp ", "AFP";
        Telnet => "teln", "Telnet";
        Ssh => "ssh ", "SSH";
        Ftps => "ftps", "FTPS";
        Https => "htps", "HTTPS";
        HttpProxy => "htpx", "HTTPProxy";
        HttpsProxy => "htsx", "HTTPSProxy";
        FtpProxy => "ftpx", "FTPProxy";
        Smb => "smb ", "SMB";
        Rtsp => "rtsp", "RTSP";
        RtspProxy => "rtsx", "RTSPProxy";
        Daap => "daap", "DAAP";
        Eppc => "eppc", "EPPC";
        Ipp => "ipp ", "IPP";
        Nntps => "ntps", "NNTPS";
        Ldaps => "ldps", "LDAPS";
        Telnets => "tels", "TelnetS";
        Imaps => "imps", "IMAPS";
        Ircs => "ircs", "IRCS";
        Pop3s => "pops", "POP3S";
    }
}

impl ProtocolKind {
    /// Guess the protocol from a URL scheme, e.g. `"https"`
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.description().eq_ignore_ascii_case(scheme))
    }
}

coded_enum! {
    /// Authentication scheme of a network credential
    pub enum AuthenticationKind {
        Ntlm => "ntlm", "NTLM";
        Msn => "msna", "MSN";
        Dpa => "dpaa", "DPA";
        Rpa => "rpaa", "RPA";
        HttpBasic => "http", "HTTPBasic";
        HttpDigest => "httd", "HTTPDigest";
        HtmlForm => "form", "HTMLForm";
        Default => "dflt", "Default";
    }
}

impl Default for AuthenticationKind {
    fn default() -> Self {
        Self::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_variant_counts() {
        assert_eq!(ItemScope::ALL.len(), 2);
        assert_eq!(Accessibility::ALL.len(), 7);
        assert_eq!(ProtocolKind::ALL.len(), 31);
        assert_eq!(AuthenticationKind::ALL.len(), 8);
    }

    #[test]
    fn test_codes_are_one_to_one() {
        let codes: HashSet<_> = ProtocolKind::ALL.iter().map(|p| p.code()).collect();
        assert_eq!(codes.len(), ProtocolKind::ALL.len());
        let codes: HashSet<_> = Accessibility::ALL.iter().map(|a| a.code()).collect();
        assert_eq!(codes.len(), Accessibility::ALL.len());
        let codes: HashSet<_> = AuthenticationKind::ALL.iter().map(|a| a.code()).collect();
        assert_eq!(codes.len(), AuthenticationKind::ALL.len());
    }

    #[test]
    fn test_reverse_lookup() {
        for &p in ProtocolKind::ALL {
            assert_eq!(ProtocolKind::from_code(p.code()), Some(p));
        }
        assert_eq!(Accessibility::from_code("ck"), Some(Accessibility::AfterFirstUnlock));
        assert_eq!(ItemScope::from_code("inet"), Some(ItemScope::NetworkCredential));
        assert_eq!(AuthenticationKind::from_code("dflt"), Some(AuthenticationKind::Default));
    }

    #[test]
    fn test_reverse_lookup_unrecognized() {
        assert_eq!(ProtocolKind::from_code("gopher"), None);
        assert_eq!(Accessibility::from_code(""), None);
        assert_eq!(ItemScope::from_code("keys"), None);
        assert_eq!(AuthenticationKind::from_code("kerb"), None);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Accessibility::default(), Accessibility::AfterFirstUnlock);
        assert_eq!(AuthenticationKind::default(), AuthenticationKind::Default);
    }

    #[test]
    fn test_from_scheme() {
        assert_eq!(ProtocolKind::from_scheme("https"), Some(ProtocolKind::Https));
        assert_eq!(ProtocolKind::from_scheme("SSH"), Some(ProtocolKind::Ssh));
        assert_eq!(ProtocolKind::from_scheme("gopher"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Accessibility::WhenUnlocked.to_string(), "WhenUnlocked");
        assert_eq!(ProtocolKind::HttpsProxy.to_string(), "HTTPSProxy");
    }
}
