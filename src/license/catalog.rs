use super::{LicenseEntry, Restriction};

/// Revision of [`BUILTIN_LICENSES`]. Bump whenever a row or tier changes.
pub const BUILTIN_VERSION: &str = "2024.3";

pub const APACHE_2: &str = "Apache License 2.0";
pub const AGPL_1_ONLY: &str = "Affero General Public License v1.0 only";
pub const AGPL_3_OR_LATER: &str = "GNU Affero General Public License v3.0 or later";
pub const BSD_1: &str = "BSD 1-Clause License";
pub const BSD_2: &str = "BSD 2-Clause \"Simplified\" License";
pub const BSD_3: &str = "BSD 3-Clause \"New\" or \"Revised\" License";
pub const GPL_3_ONLY: &str = "GNU General Public License v3.0 only";
pub const GPL_3_OR_LATER: &str = "GNU General Public License v3.0 or later";
pub const LGPL_3_ONLY: &str = "GNU Lesser General Public License v3.0 only";
pub const MIT: &str = "MIT License";
pub const PUBLIC_DOMAIN: &str = "Public domain";

/// One catalog license plus every SPDX identifier or alias that names it.
pub struct LicenseRow {
    pub name: &'static str,
    pub url: &'static str,
    pub restriction: Restriction,
    pub identifiers: &'static [&'static str],
}

impl LicenseRow {
    pub fn entry(&self) -> LicenseEntry {
        LicenseEntry {
            name: self.name.to_string(),
            url: self.url.to_string(),
            restriction: self.restriction,
        }
    }
}

use Restriction::{AmbassadorServers, Forbidden, Unrestricted};

pub const BUILTIN_LICENSES: &[LicenseRow] = &[
    // Permissive
    LicenseRow {
        name: "Academic Free License v2.1",
        url: "https://spdx.org/licenses/AFL-2.1.html",
        restriction: Unrestricted,
        identifiers: &["AFL-2.1"],
    },
    LicenseRow {
        name: APACHE_2,
        url: "https://opensource.org/licenses/Apache-2.0",
        restriction: Unrestricted,
        identifiers: &[
            "Apache-2.0",
            "Apache 2.0",
            "Apache License 2.0",
            "Apache License, Version 2.0",
            "Apache Software License",
        ],
    },
    LicenseRow {
        name: "Artistic License 2.0",
        url: "https://spdx.org/licenses/Artistic-2.0.html",
        restriction: Unrestricted,
        identifiers: &["Artistic-2.0"],
    },
    LicenseRow {
        name: "Blue Oak Model License 1.0.0",
        url: "https://blueoakcouncil.org/license/1.0.0",
        restriction: Unrestricted,
        identifiers: &["BlueOak-1.0.0"],
    },
    LicenseRow {
        name: BSD_1,
        url: "https://spdx.org/licenses/BSD-1-Clause.html",
        restriction: Unrestricted,
        identifiers: &["BSD-1-Clause"],
    },
    LicenseRow {
        name: BSD_2,
        url: "https://opensource.org/licenses/BSD-2-Clause",
        restriction: Unrestricted,
        identifiers: &["BSD-2-Clause", "Simplified BSD"],
    },
    LicenseRow {
        name: BSD_3,
        url: "https://opensource.org/licenses/BSD-3-Clause",
        restriction: Unrestricted,
        identifiers: &["BSD-3-Clause", "New BSD", "Modified BSD"],
    },
    LicenseRow {
        name: "BSD Zero Clause License",
        url: "https://spdx.org/licenses/0BSD.html",
        restriction: Unrestricted,
        identifiers: &["0BSD"],
    },
    LicenseRow {
        name: "Creative Commons Attribution 3.0 Unported",
        url: "https://creativecommons.org/licenses/by/3.0/legalcode",
        restriction: Unrestricted,
        identifiers: &["CC-BY-3.0"],
    },
    LicenseRow {
        name: "Creative Commons Attribution 4.0 International",
        url: "https://creativecommons.org/licenses/by/4.0/legalcode",
        restriction: Unrestricted,
        identifiers: &["CC-BY-4.0"],
    },
    LicenseRow {
        name: "Creative Commons Zero v1.0 Universal",
        url: "https://creativecommons.org/publicdomain/zero/1.0/legalcode",
        restriction: Unrestricted,
        identifiers: &["CC0-1.0", "CC0"],
    },
    LicenseRow {
        name: "ISC License",
        url: "https://opensource.org/licenses/ISC",
        restriction: Unrestricted,
        identifiers: &["ISC", "ISC License"],
    },
    LicenseRow {
        name: MIT,
        url: "https://opensource.org/licenses/MIT",
        restriction: Unrestricted,
        identifiers: &["MIT", "MIT License", "The MIT License"],
    },
    LicenseRow {
        name: "MIT No Attribution",
        url: "https://spdx.org/licenses/MIT-0.html",
        restriction: Unrestricted,
        identifiers: &["MIT-0"],
    },
    LicenseRow {
        name: "Mozilla Public License 2.0",
        url: "https://opensource.org/licenses/MPL-2.0",
        restriction: Unrestricted,
        identifiers: &["MPL-2.0", "Mozilla Public License 2.0"],
    },
    LicenseRow {
        name: "Python Software Foundation License 2.0",
        url: "https://spdx.org/licenses/PSF-2.0.html",
        restriction: Unrestricted,
        identifiers: &["PSF-2.0", "PSF"],
    },
    LicenseRow {
        name: "Python License 2.0",
        url: "https://spdx.org/licenses/Python-2.0.html",
        restriction: Unrestricted,
        identifiers: &["Python-2.0"],
    },
    LicenseRow {
        name: PUBLIC_DOMAIN,
        url: "",
        restriction: Unrestricted,
        identifiers: &["Public Domain", "Public domain"],
    },
    LicenseRow {
        name: "The Unlicense",
        url: "https://unlicense.org/",
        restriction: Unrestricted,
        identifiers: &["Unlicense"],
    },
    LicenseRow {
        name: "Unicode License Agreement - Data Files and Software (2015)",
        url: "https://spdx.org/licenses/Unicode-DFS-2015.html",
        restriction: Unrestricted,
        identifiers: &["Unicode-DFS-2015"],
    },
    LicenseRow {
        name: "Do What The F*ck You Want To Public License",
        url: "http://www.wtfpl.net/about/",
        restriction: Unrestricted,
        identifiers: &["WTFPL"],
    },
    LicenseRow {
        name: "zlib License",
        url: "https://opensource.org/licenses/Zlib",
        restriction: Unrestricted,
        identifiers: &["Zlib"],
    },
    // Copyleft: internal servers only
    LicenseRow {
        name: "Creative Commons Attribution Share Alike 4.0 International",
        url: "https://creativecommons.org/licenses/by-sa/4.0/legalcode",
        restriction: AmbassadorServers,
        identifiers: &["CC-BY-SA-4.0"],
    },
    LicenseRow {
        name: "Eclipse Public License 1.0",
        url: "https://spdx.org/licenses/EPL-1.0.html",
        restriction: AmbassadorServers,
        identifiers: &["EPL-1.0"],
    },
    LicenseRow {
        name: "Eclipse Public License 2.0",
        url: "https://spdx.org/licenses/EPL-2.0.html",
        restriction: AmbassadorServers,
        identifiers: &["EPL-2.0"],
    },
    LicenseRow {
        name: "GNU General Public License v2.0 only",
        url: "https://spdx.org/licenses/GPL-2.0-only.html",
        restriction: AmbassadorServers,
        identifiers: &["GPL-2.0-only", "GPL-2.0"],
    },
    LicenseRow {
        name: "GNU General Public License v2.0 or later",
        url: "https://spdx.org/licenses/GPL-2.0-or-later.html",
        restriction: AmbassadorServers,
        identifiers: &["GPL-2.0-or-later", "GPL-2.0+"],
    },
    LicenseRow {
        name: GPL_3_ONLY,
        url: "https://spdx.org/licenses/GPL-3.0-only.html",
        restriction: AmbassadorServers,
        identifiers: &["GPL-3.0-only", "GPL-3.0"],
    },
    LicenseRow {
        name: GPL_3_OR_LATER,
        url: "https://spdx.org/licenses/GPL-3.0-or-later.html",
        restriction: AmbassadorServers,
        identifiers: &["GPL-3.0-or-later", "GPL-3.0+"],
    },
    LicenseRow {
        name: "GNU Lesser General Public License v2.1 only",
        url: "https://spdx.org/licenses/LGPL-2.1-only.html",
        restriction: AmbassadorServers,
        identifiers: &["LGPL-2.1-only", "LGPL-2.1"],
    },
    LicenseRow {
        name: "GNU Lesser General Public License v2.1 or later",
        url: "https://spdx.org/licenses/LGPL-2.1-or-later.html",
        restriction: AmbassadorServers,
        identifiers: &["LGPL-2.1-or-later", "LGPL-2.1+"],
    },
    LicenseRow {
        name: LGPL_3_ONLY,
        url: "https://spdx.org/licenses/LGPL-3.0-only.html",
        restriction: AmbassadorServers,
        identifiers: &["LGPL-3.0-only", "LGPL-3.0"],
    },
    LicenseRow {
        name: "GNU Lesser General Public License v3.0 or later",
        url: "https://spdx.org/licenses/LGPL-3.0-or-later.html",
        restriction: AmbassadorServers,
        identifiers: &["LGPL-3.0-or-later", "LGPL-3.0+"],
    },
    // Forbidden
    LicenseRow {
        name: AGPL_1_ONLY,
        url: "https://spdx.org/licenses/AGPL-1.0-only.html",
        restriction: Forbidden,
        identifiers: &["AGPL-1.0-only", "AGPL-1.0"],
    },
    LicenseRow {
        name: "Affero General Public License v1.0 or later",
        url: "https://spdx.org/licenses/AGPL-1.0-or-later.html",
        restriction: Forbidden,
        identifiers: &["AGPL-1.0-or-later"],
    },
    LicenseRow {
        name: "GNU Affero General Public License v3.0 only",
        url: "https://spdx.org/licenses/AGPL-3.0-only.html",
        restriction: Forbidden,
        identifiers: &["AGPL-3.0-only", "AGPL-3.0"],
    },
    LicenseRow {
        name: AGPL_3_OR_LATER,
        url: "https://spdx.org/licenses/AGPL-3.0-or-later.html",
        restriction: Forbidden,
        identifiers: &["AGPL-3.0-or-later", "AGPL-3.0+"],
    },
    LicenseRow {
        name: "Business Source License 1.1",
        url: "https://spdx.org/licenses/BUSL-1.1.html",
        restriction: Forbidden,
        identifiers: &["BUSL-1.1"],
    },
    LicenseRow {
        name: "Server Side Public License, v 1",
        url: "https://spdx.org/licenses/SSPL-1.0.html",
        restriction: Forbidden,
        identifiers: &["SSPL-1.0"],
    },
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_identifiers_are_unique_across_rows() {
        let mut seen = HashSet::new();
        for row in BUILTIN_LICENSES {
            assert!(!row.identifiers.is_empty(), "{} has no identifiers", row.name);
            for id in row.identifiers {
                assert!(seen.insert(*id), "identifier {id} appears twice");
            }
        }
    }

    #[test]
    fn test_agpl_family_is_forbidden() {
        for row in BUILTIN_LICENSES.iter().filter(|r| r.name.contains("Affero")) {
            assert_eq!(row.restriction, Restriction::Forbidden, "{}", row.name);
        }
    }
}
