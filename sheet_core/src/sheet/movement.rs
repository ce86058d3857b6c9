//! MoveResolver - effective move under the current maneuver and posture

use crate::config::{ManeuverDetail, ManeuverVisibility};
use serde::{Deserialize, Serialize};

/// How a maneuver or posture limits movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveOverride {
    None,
    OneYard,
    Step,
    TwoSteps,
    OneThird,
    Half,
    TwoThirds,
    Full,
}

impl MoveOverride {
    /// Move allowed from `base` under this override
    pub fn apply(self, base: i32) -> i32 {
        let ceil_div = |n: i32, d: i32| (f64::from(n) / f64::from(d)).ceil() as i32;
        match self {
            MoveOverride::None => 0,
            MoveOverride::OneYard => 1,
            MoveOverride::Step => ceil_div(base, 10).max(1),
            MoveOverride::TwoSteps => ceil_div(base, 10).max(1) * 2,
            MoveOverride::OneThird => ceil_div(base, 3),
            MoveOverride::Half => ceil_div(base, 2),
            MoveOverride::TwoThirds => ceil_div(base * 2, 3),
            MoveOverride::Full => base,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoveOverride::None => "None",
            MoveOverride::OneYard => "1 yd/sec",
            MoveOverride::Step => "Step",
            MoveOverride::TwoSteps => "Step or Two",
            MoveOverride::OneThird => "×1/3",
            MoveOverride::Half => "Half",
            MoveOverride::TwoThirds => "×2/3",
            MoveOverride::Full => "Full",
        }
    }
}

/// Combat maneuvers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Maneuver {
    #[default]
    DoNothing,
    Move,
    ChangePosture,
    Aim,
    Evaluate,
    Attack,
    Feint,
    AllOutAttack,
    AllOutAttackDetermined,
    AllOutAttackDouble,
    AllOutAttackFeint,
    AllOutAttackStrong,
    AllOutAttackSuppression,
    MoveAndAttack,
    AllOutDefense,
    AllOutDefenseDodge,
    AllOutDefenseParry,
    AllOutDefenseBlock,
    AllOutDefenseDouble,
    Concentrate,
    Ready,
    Wait,
}

impl Maneuver {
    pub fn move_override(self) -> MoveOverride {
        use Maneuver::*;
        match self {
            DoNothing | ChangePosture | Wait => MoveOverride::None,
            Move | MoveAndAttack => MoveOverride::Full,
            AllOutAttack
            | AllOutAttackDetermined
            | AllOutAttackDouble
            | AllOutAttackFeint
            | AllOutAttackStrong
            | AllOutAttackSuppression
            | AllOutDefenseDodge => MoveOverride::Half,
            AllOutDefense => MoveOverride::TwoSteps,
            Aim | Evaluate | Attack | Feint | AllOutDefenseParry | AllOutDefenseBlock
            | AllOutDefenseDouble | Concentrate | Ready => MoveOverride::Step,
        }
    }

    pub fn label(self) -> &'static str {
        use Maneuver::*;
        match self {
            DoNothing => "Do Nothing",
            Move => "Move",
            ChangePosture => "Change Posture",
            Aim => "Aim",
            Evaluate => "Evaluate",
            Attack => "Attack",
            Feint => "Feint",
            AllOutAttack => "All-Out Attack",
            AllOutAttackDetermined => "All-Out Attack (Determined)",
            AllOutAttackDouble => "All-Out Attack (Double)",
            AllOutAttackFeint => "All-Out Attack (Feint)",
            AllOutAttackStrong => "All-Out Attack (Strong)",
            AllOutAttackSuppression => "All-Out Attack (Suppression Fire)",
            MoveAndAttack => "Move and Attack",
            AllOutDefense => "All-Out Defense",
            AllOutDefenseDodge => "All-Out Defense (Increased Dodge)",
            AllOutDefenseParry => "All-Out Defense (Increased Parry)",
            AllOutDefenseBlock => "All-Out Defense (Increased Block)",
            AllOutDefenseDouble => "All-Out Defense (Double)",
            Concentrate => "Concentrate",
            Ready => "Ready",
            Wait => "Wait",
        }
    }

    /// Maneuver shown once detail is reduced
    fn reduced(self, detail: ManeuverDetail) -> Maneuver {
        use Maneuver::*;
        match detail {
            ManeuverDetail::Full => self,
            ManeuverDetail::NoFeint => match self {
                Feint => Attack,
                AllOutAttackFeint => AllOutAttack,
                other => other,
            },
            ManeuverDetail::General => match self {
                Feint => Attack,
                AllOutAttackDetermined
                | AllOutAttackDouble
                | AllOutAttackFeint
                | AllOutAttackStrong
                | AllOutAttackSuppression => AllOutAttack,
                AllOutDefenseDodge
                | AllOutDefenseParry
                | AllOutDefenseBlock
                | AllOutDefenseDouble => AllOutDefense,
                other => other,
            },
        }
    }

    /// What a viewer sees of this maneuver, `None` when it is hidden from them.
    /// Owners and the GM always see the full maneuver.
    pub fn public_label(
        self,
        visibility: ManeuverVisibility,
        detail: ManeuverDetail,
        viewer_is_owner_or_gm: bool,
    ) -> Option<&'static str> {
        if viewer_is_owner_or_gm {
            return Some(self.label());
        }
        match visibility {
            ManeuverVisibility::Everyone => Some(self.reduced(detail).label()),
            ManeuverVisibility::GmAndOwner | ManeuverVisibility::NoOne => None,
        }
    }
}

/// Body postures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Posture {
    #[default]
    Standing,
    Crouching,
    Kneeling,
    Crawling,
    Sitting,
    LyingProne,
    LyingFaceUp,
}

impl Posture {
    pub fn move_override(self) -> MoveOverride {
        match self {
            Posture::Standing => MoveOverride::Full,
            Posture::Crouching => MoveOverride::TwoThirds,
            Posture::Kneeling | Posture::Crawling => MoveOverride::OneThird,
            Posture::Sitting => MoveOverride::None,
            Posture::LyingProne | Posture::LyingFaceUp => MoveOverride::OneYard,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Posture::Standing => "Standing",
            Posture::Crouching => "Crouching",
            Posture::Kneeling => "Kneeling",
            Posture::Crawling => "Crawling",
            Posture::Sitting => "Sitting",
            Posture::LyingProne => "Prone",
            Posture::LyingFaceUp => "Lying Face Up",
        }
    }
}

/// Movement environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveModeKind {
    Ground,
    Air,
    Water,
    Space,
}

/// A named movement mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveMode {
    pub mode: MoveModeKind,
    pub basic: i32,
    /// Enhanced (top) rate, when the character has one
    #[serde(default)]
    pub enhanced: Option<i32>,
    #[serde(default)]
    pub default: bool,
}

impl MoveMode {
    pub fn new(mode: MoveModeKind, basic: i32) -> Self {
        MoveMode {
            mode,
            basic,
            enhanced: None,
            default: false,
        }
    }
}

/// Make `mode` the only default move mode. Returns false when the
/// character has no such mode.
pub fn set_default_move_mode(modes: &mut [MoveMode], mode: MoveModeKind) -> bool {
    if !modes.iter().any(|m| m.mode == mode) {
        return false;
    }
    for m in modes.iter_mut() {
        m.default = m.mode == mode;
    }
    true
}

/// Effective move for this pass
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MoveResult {
    pub value: i32,
    /// Which override constrained move, empty when neither did
    pub label: String,
}

/// Resolve effective move from `base`.
///
/// The lesser of the maneuver and posture limits wins. When `apply` is false
/// (setting off, or no encounter) the base is returned but the label is still
/// computed for display.
pub fn resolve_move(base: i32, maneuver: Maneuver, posture: Posture, apply: bool) -> MoveResult {
    let by_maneuver = maneuver.move_override();
    let by_posture = posture.move_override();
    let maneuver_move = by_maneuver.apply(base).min(base);
    let posture_move = by_posture.apply(base).min(base);

    let (value, label) = if maneuver_move < posture_move {
        (maneuver_move, format!("{} ({})", by_maneuver.label(), maneuver.label()))
    } else if posture_move < maneuver_move {
        (posture_move, format!("{} ({})", by_posture.label(), posture.label()))
    } else if maneuver_move < base {
        (
            maneuver_move,
            format!("{} ({}, {})", by_maneuver.label(), maneuver.label(), posture.label()),
        )
    } else {
        (base, String::new())
    };

    MoveResult {
        value: if apply { value } else { base },
        label,
    }
}
