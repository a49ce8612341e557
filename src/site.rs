//! Static navigation and hero content, plus the region hierarchy
//!
//! Every interactive region of the page is a [`Node`]. Its ancestry is fixed,
//! so pointer targets can be built from a node alone with [`target`].

use crate::events::{EventTarget, NodeId};

/// Plain top-level links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Link {
    About,
    Technology,
    Careers,
    Shop,
    Contact,
}

impl Link {
    pub const ALL: [Link; 5] = [
        Link::About,
        Link::Technology,
        Link::Careers,
        Link::Shop,
        Link::Contact,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Link::About => "About",
            Link::Technology => "Technology",
            Link::Careers => "Careers",
            Link::Shop => "Shop",
            Link::Contact => "Contact Us",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Link::About => "#about",
            Link::Technology => "#technology",
            Link::Careers => "#careers",
            Link::Shop => "#shop",
            Link::Contact => "#contact",
        }
    }

    fn slug(&self) -> &'static str {
        self.href().trim_start_matches('#')
    }

    fn index(&self) -> u32 {
        match self {
            Link::About => 0,
            Link::Technology => 1,
            Link::Careers => 2,
            Link::Shop => 3,
            Link::Contact => 4,
        }
    }
}

/// Entries under the Products flyout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    IcDesign,
    SensorInterface,
    EmbeddedSystems,
    LabEquipment,
}

impl Product {
    pub const ALL: [Product; 4] = [
        Product::IcDesign,
        Product::SensorInterface,
        Product::EmbeddedSystems,
        Product::LabEquipment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Product::IcDesign => "IC Design",
            Product::SensorInterface => "Sensor Interface",
            Product::EmbeddedSystems => "Embedded Systems",
            Product::LabEquipment => "Lab Equipment",
        }
    }

    pub fn href(&self) -> &'static str {
        match self {
            Product::IcDesign => "#ic-design",
            Product::SensorInterface => "#sensor-interface",
            Product::EmbeddedSystems => "#embedded-systems",
            Product::LabEquipment => "#lab-equipments",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Product::IcDesign => "Custom integrated circuits",
            Product::SensorInterface => "Advanced sensor solutions",
            Product::EmbeddedSystems => "Smart embedded platforms",
            Product::LabEquipment => "Professional lab tools",
        }
    }

    fn slug(&self) -> &'static str {
        self.href().trim_start_matches('#')
    }

    fn index(&self) -> u32 {
        match self {
            Product::IcDesign => 0,
            Product::SensorInterface => 1,
            Product::EmbeddedSystems => 2,
            Product::LabEquipment => 3,
        }
    }
}

/// One slot of the desktop nav bar, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Link(Link),
    Products,
}

pub const PRODUCTS_LABEL: &str = "Products";
pub const PRODUCTS_HREF: &str = "#products";
pub const BRAND: &str = "Navstate";

/// Desktop bar order; Shop and Contact Us sit on the right
pub const NAV_ENTRIES: [NavEntry; 6] = [
    NavEntry::Link(Link::About),
    NavEntry::Products,
    NavEntry::Link(Link::Technology),
    NavEntry::Link(Link::Careers),
    NavEntry::Link(Link::Shop),
    NavEntry::Link(Link::Contact),
];

/// Hero section copy
pub mod hero {
    pub const EYEBROW: &str = "Intelligent Systems Platform";
    pub const HEADLINE: [&str; 2] = ["Build smarter products", "with confidence"];
    pub const BODY: &str =
        "Design, deploy, and scale intelligent applications using a modern, developer-first platform.";
    pub const PRIMARY_ACTION: &str = "Get Started";
    pub const SECONDARY_ACTION: &str = "View Docs";

    /// Number of staggered elements (eyebrow, two headline lines, body, actions)
    pub const STAGGERED_ELEMENTS: usize = 5;
}

/// A region of the rendered page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Document,
    NavBar,
    Logo,
    Link(Link),
    /// Container for the flyout: trigger plus panel
    ProductsMenu,
    ProductsTrigger,
    ProductsPanel,
    ProductEntry(Product),
    Hamburger,
    MobilePanel,
    MobileLink(Link),
    /// Disclosure row that expands the nested product list
    MobileProducts,
    MobileSubmenu,
    MobileProductEntry(Product),
    Hero,
    HeroPrimary,
    HeroSecondary,
}

impl Node {
    pub fn all() -> Vec<Node> {
        let mut nodes = vec![
            Node::Document,
            Node::NavBar,
            Node::Logo,
            Node::ProductsMenu,
            Node::ProductsTrigger,
            Node::ProductsPanel,
            Node::Hamburger,
            Node::MobilePanel,
            Node::MobileProducts,
            Node::MobileSubmenu,
            Node::Hero,
            Node::HeroPrimary,
            Node::HeroSecondary,
        ];
        nodes.extend(Link::ALL.iter().map(|&link| Node::Link(link)));
        nodes.extend(Link::ALL.iter().map(|&link| Node::MobileLink(link)));
        nodes.extend(Product::ALL.iter().map(|&p| Node::ProductEntry(p)));
        nodes.extend(Product::ALL.iter().map(|&p| Node::MobileProductEntry(p)));
        nodes
    }

    pub fn id(&self) -> NodeId {
        let raw = match self {
            Node::Document => 1,
            Node::NavBar => 2,
            Node::Logo => 3,
            Node::ProductsMenu => 4,
            Node::ProductsTrigger => 5,
            Node::ProductsPanel => 6,
            Node::Hamburger => 7,
            Node::MobilePanel => 8,
            Node::MobileProducts => 9,
            Node::MobileSubmenu => 10,
            Node::Hero => 11,
            Node::HeroPrimary => 12,
            Node::HeroSecondary => 13,
            Node::Link(link) => 20 + link.index(),
            Node::ProductEntry(product) => 30 + product.index(),
            Node::MobileLink(link) => 40 + link.index(),
            Node::MobileProductEntry(product) => 50 + product.index(),
        };
        NodeId(raw)
    }

    /// Stable name used by replay scripts
    pub fn name(&self) -> String {
        match self {
            Node::Document => "document".to_string(),
            Node::NavBar => "nav-bar".to_string(),
            Node::Logo => "logo".to_string(),
            Node::ProductsMenu => "products-menu".to_string(),
            Node::ProductsTrigger => "products-trigger".to_string(),
            Node::ProductsPanel => "products-panel".to_string(),
            Node::Hamburger => "hamburger".to_string(),
            Node::MobilePanel => "mobile-panel".to_string(),
            Node::MobileProducts => "mobile-products".to_string(),
            Node::MobileSubmenu => "mobile-submenu".to_string(),
            Node::Hero => "hero".to_string(),
            Node::HeroPrimary => "hero-primary".to_string(),
            Node::HeroSecondary => "hero-secondary".to_string(),
            Node::Link(link) => format!("link:{}", link.slug()),
            Node::ProductEntry(product) => format!("product:{}", product.slug()),
            Node::MobileLink(link) => format!("mobile-link:{}", link.slug()),
            Node::MobileProductEntry(product) => format!("mobile-product:{}", product.slug()),
        }
    }

    pub fn from_name(name: &str) -> Option<Node> {
        Node::all().into_iter().find(|node| node.name() == name)
    }

    pub fn parent(&self) -> Option<Node> {
        match self {
            Node::Document => None,
            Node::NavBar | Node::Hero => Some(Node::Document),
            Node::Logo
            | Node::Link(_)
            | Node::ProductsMenu
            | Node::Hamburger
            | Node::MobilePanel => Some(Node::NavBar),
            Node::ProductsTrigger | Node::ProductsPanel => Some(Node::ProductsMenu),
            Node::ProductEntry(_) => Some(Node::ProductsPanel),
            Node::MobileLink(_) | Node::MobileProducts | Node::MobileSubmenu => {
                Some(Node::MobilePanel)
            }
            Node::MobileProductEntry(_) => Some(Node::MobileSubmenu),
            Node::HeroPrimary | Node::HeroSecondary => Some(Node::Hero),
        }
    }
}

/// Pointer target for `node`, outermost ancestor first
pub fn target(node: Node) -> EventTarget {
    let mut path = vec![node.id()];
    let mut current = node;
    while let Some(parent) = current.parent() {
        path.push(parent.id());
        current = parent;
    }
    path.reverse();
    EventTarget::new(path)
}
