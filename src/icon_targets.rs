// ============================================================================
// icon_targets.rs — Static catalog of icons to generate per platform
// ============================================================================

use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Platform {
    Android,
    Ios,
    Macos,
    Web,
    Windows,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::Android,
        Platform::Ios,
        Platform::Macos,
        Platform::Web,
        Platform::Windows,
    ];
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => write!(f, "Android"),
            Platform::Ios => write!(f, "iOS"),
            Platform::Macos => write!(f, "macOS"),
            Platform::Web => write!(f, "Web"),
            Platform::Windows => write!(f, "Windows"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconFormat {
    Png,
    /// Multi-resolution container; all sizes come from one canvas.
    Ico { sizes: Vec<u32> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitMode {
    /// Aspect-preserving downscale, centered on a transparent canvas.
    FitPad,
    /// Exact resize ignoring aspect ratio, alpha flattened onto white.
    Stretch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IconTarget {
    pub platform: Platform,
    /// Relative to the project root
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub format: IconFormat,
    pub mode: FitMode,
    pub background: Option<[u8; 3]>,
}

impl IconTarget {
    fn png(platform: Platform, path: String, size: u32) -> Self {
        Self {
            platform,
            path: PathBuf::from(path),
            width: size,
            height: size,
            format: IconFormat::Png,
            mode: FitMode::FitPad,
            background: None,
        }
    }

    pub fn label(&self) -> String {
        match &self.format {
            IconFormat::Ico { sizes } => format!(
                "{} ({})",
                self.path.display(),
                sizes.iter().map(|s| format!("{s}x{s}")).collect::<Vec<_>>().join(", ")
            ),
            IconFormat::Png => format!("{} ({}x{})", self.path.display(), self.width, self.height),
        }
    }
}

const ANDROID_DENSITIES: [(&str, u32); 5] = [
    ("mipmap-mdpi", 48),
    ("mipmap-hdpi", 72),
    ("mipmap-xhdpi", 96),
    ("mipmap-xxhdpi", 144),
    ("mipmap-xxxhdpi", 192),
];

const IOS_ICONS: [(&str, u32, u32); 15] = [
    ("Icon-App-20x20@1x.png", 20, 20),
    ("Icon-App-20x20@2x.png", 40, 40),
    ("Icon-App-20x20@3x.png", 60, 60),
    ("Icon-App-29x29@1x.png", 29, 29),
    ("Icon-App-29x29@2x.png", 58, 58),
    ("Icon-App-29x29@3x.png", 87, 87),
    ("Icon-App-40x40@1x.png", 40, 40),
    ("Icon-App-40x40@2x.png", 80, 80),
    ("Icon-App-40x40@3x.png", 120, 120),
    ("Icon-App-60x60@2x.png", 120, 120),
    ("Icon-App-60x60@3x.png", 180, 180),
    ("Icon-App-76x76@1x.png", 76, 76),
    ("Icon-App-76x76@2x.png", 152, 152),
    ("Icon-App-83.5x83.5@2x.png", 167, 167),
    ("Icon-App-1024x1024@1x.png", 1024, 1024),
];

const IOS_DIR: &str = "ios/Runner/Assets.xcassets/AppIcon.appiconset";
const MACOS_DIR: &str = "macos/Runner/Assets.xcassets/AppIcon.appiconset";
const MACOS_SIZES: [u32; 7] = [16, 32, 64, 128, 256, 512, 1024];
const WEB_ICONS: [(&str, u32); 4] = [
    ("Icon-192.png", 192),
    ("Icon-512.png", 512),
    ("Icon-maskable-192.png", 192),
    ("Icon-maskable-512.png", 512),
];
const WINDOWS_ICO: &str = "windows/runner/resources/app_icon.ico";
const WINDOWS_ICO_SIZES: [u32; 6] = [16, 32, 48, 64, 128, 256];

/// Targets for one platform, in generation order.
pub fn platform_targets(platform: Platform, maskable_background: Option<[u8; 3]>) -> Vec<IconTarget> {
    match platform {
        Platform::Android => ANDROID_DENSITIES
            .iter()
            .map(|(folder, size)| {
                IconTarget::png(
                    platform,
                    format!("android/app/src/main/res/{}/ic_launcher.png", folder),
                    *size,
                )
            })
            .collect(),
        Platform::Ios => IOS_ICONS
            .iter()
            .map(|(name, w, h)| IconTarget {
                platform,
                path: PathBuf::from(IOS_DIR).join(name),
                width: *w,
                height: *h,
                format: IconFormat::Png,
                mode: FitMode::Stretch,
                background: None,
            })
            .collect(),
        Platform::Macos => MACOS_SIZES
            .iter()
            .map(|size| IconTarget::png(platform, format!("{}/app_icon_{}.png", MACOS_DIR, size), *size))
            .collect(),
        Platform::Web => WEB_ICONS
            .iter()
            .map(|(name, size)| {
                let mut target = IconTarget::png(platform, format!("web/icons/{}", name), *size);
                if name.contains("maskable") {
                    target.background = maskable_background;
                }
                target
            })
            .collect(),
        Platform::Windows => {
            let largest = WINDOWS_ICO_SIZES[WINDOWS_ICO_SIZES.len() - 1];
            vec![IconTarget {
                platform,
                path: PathBuf::from(WINDOWS_ICO),
                width: largest,
                height: largest,
                format: IconFormat::Ico { sizes: WINDOWS_ICO_SIZES.to_vec() },
                mode: FitMode::FitPad,
                background: None,
            }]
        }
    }
}

/// Full catalog for the selected platforms (all when `platforms` is empty).
pub fn catalog(platforms: &[Platform], maskable_background: Option<[u8; 3]>) -> Vec<IconTarget> {
    let selected: Vec<Platform> = if platforms.is_empty() {
        Platform::ALL.to_vec()
    } else {
        Platform::ALL.iter().copied().filter(|p| platforms.contains(p)).collect()
    };
    selected
        .into_iter()
        .flat_map(|p| platform_targets(p, maskable_background))
        .collect()
}
