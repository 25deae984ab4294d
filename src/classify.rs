//! Identifier classification: which import source an identifier comes from.
//!
//! Catalog matches win outright. Everything else runs through [`RULES`], an
//! ordered table evaluated first-match-wins; the order is part of the
//! contract ("FaIcon" is a Font Awesome icon, not a generic icon). Anything
//! left over falls back to the framework core package.

use crate::model::{Catalog, ComponentMeta};

/// Namespace sentinel used for framework-wide style helpers (`<chakra.div>`).
pub const NAMESPACE: &str = "chakra";

/// Fixed package import sources, in header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Package {
    FaIcons,
    MdIcons,
    BsIcons,
    Icons,
    Core,
    Input,
    Spinner,
}

impl Package {
    pub const ALL: [Package; 7] = [
        Package::FaIcons,
        Package::MdIcons,
        Package::BsIcons,
        Package::Icons,
        Package::Core,
        Package::Input,
        Package::Spinner,
    ];

    /// Module specifier used in import statements.
    pub fn module(self) -> &'static str {
        match self {
            Package::FaIcons => "react-icons/fa",
            Package::MdIcons => "react-icons/md",
            Package::BsIcons => "react-icons/bs",
            Package::Icons => "@chakra-ui/icons",
            Package::Core => "@chakra-ui/react",
            Package::Input => "@chakra-ui/input",
            Package::Spinner => "react-spinners",
        }
    }

    /// Buckets that are also accumulated across the whole batch.
    pub fn is_shared(self) -> bool {
        matches!(self, Package::Core | Package::Icons | Package::Input)
    }
}

/// Classification result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bucket {
    /// A component documented elsewhere in the batch
    Local(ComponentMeta),
    Package(Package),
}

/// One shape rule. Identifiers in `overrides` are never claimed by it, even
/// when `matches` accepts them.
pub struct Rule {
    pub name: &'static str,
    pub package: Package,
    pub matches: fn(&str) -> bool,
    pub overrides: &'static [&'static str],
}

impl Rule {
    pub fn claims(&self, identifier: &str) -> bool {
        !self.overrides.iter().any(|o| *o == identifier) && (self.matches)(identifier)
    }
}

/// Framework core components that look like generic icons.
pub const ICON_OVERRIDES: &[&str] = &["Icon", "IconButton", "createIcon"];

/// Framework core components that look like input-package parts.
pub const INPUT_OVERRIDES: &[&str] = &[
    "InputGroup",
    "InputLeftAddon",
    "InputRightAddon",
    "InputLeftElement",
    "InputRightElement",
];

/// Framework hooks recognized by name.
pub const KNOWN_HOOKS: &[&str] = &[
    "useBoolean",
    "useBreakpointValue",
    "useCheckbox",
    "useCheckboxGroup",
    "useClipboard",
    "useColorMode",
    "useColorModeValue",
    "useControllableState",
    "useDisclosure",
    "useMediaQuery",
    "useMergeRefs",
    "useMultiStyleConfig",
    "useOutsideClick",
    "usePrefersReducedMotion",
    "useRadio",
    "useRadioGroup",
    "useStyleConfig",
    "useTheme",
    "useToast",
    "useToken",
];

pub static RULES: &[Rule] = &[
    Rule {
        name: "fa-prefix",
        package: Package::FaIcons,
        matches: |id| id.starts_with("Fa"),
        overrides: &[],
    },
    Rule {
        name: "md-prefix",
        package: Package::MdIcons,
        matches: |id| id.starts_with("Md"),
        overrides: &[],
    },
    Rule {
        name: "bs-prefix",
        package: Package::BsIcons,
        matches: |id| id.starts_with("Bs"),
        overrides: &[],
    },
    Rule {
        name: "icon-suffix",
        package: Package::Icons,
        matches: |id| id.ends_with("Icon"),
        overrides: ICON_OVERRIDES,
    },
    Rule {
        name: "input-family",
        package: Package::Input,
        matches: |id| id.starts_with("Input"),
        overrides: INPUT_OVERRIDES,
    },
    Rule {
        name: "loader-family",
        package: Package::Spinner,
        matches: |id| id.ends_with("Loader"),
        overrides: &[],
    },
    Rule {
        name: "core",
        package: Package::Core,
        matches: |id| KNOWN_HOOKS.iter().any(|h| *h == id) || id.starts_with("Tag") || id == NAMESPACE,
        overrides: &[],
    },
];

/// Classify an identifier. Total: every input lands in exactly one bucket.
pub fn classify(identifier: &str, catalog: &Catalog) -> Bucket {
    if let Some(meta) = catalog.find(identifier) {
        return Bucket::Local(meta.clone());
    }
    Bucket::Package(match_rule(identifier).map_or(Package::Core, |rule| rule.package))
}

/// First shape rule claiming the identifier, ignoring the catalog.
pub fn match_rule(identifier: &str) -> Option<&'static Rule> {
    RULES.iter().find(|rule| rule.claims(identifier))
}
