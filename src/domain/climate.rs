// ==========================================
// 五运六气 AHI 推演引擎 - 司天在泉配对表
// ==========================================
// 子午少阴君火司天, 阳明燥金在泉; 丑未太阴湿土司天, 太阳寒水在泉 ...
// ==========================================

use crate::domain::types::{Branch, QiPhase};
use serde::{Deserialize, Serialize};

/// 一年的司天 / 在泉之气
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimaticEffect {
    /// 司天（上半年, 客气三之气）
    pub celestial: QiPhase,
    /// 在泉（下半年, 客气终之气）
    pub terrestrial: QiPhase,
}

/// 地支对 → (司天, 在泉)
pub const CLIMATIC_PAIRINGS: [((Branch, Branch), ClimaticEffect); 6] = [
    (
        (Branch::Zi, Branch::Wu),
        ClimaticEffect {
            celestial: QiPhase::MildYinFire,
            terrestrial: QiPhase::MildYangMetal,
        },
    ),
    (
        (Branch::Chou, Branch::Wei),
        ClimaticEffect {
            celestial: QiPhase::DominantYinEarth,
            terrestrial: QiPhase::DominantYangWater,
        },
    ),
    (
        (Branch::Yin, Branch::Shen),
        ClimaticEffect {
            celestial: QiPhase::WeakYangFire,
            terrestrial: QiPhase::WeakYinWood,
        },
    ),
    (
        (Branch::Mao, Branch::You),
        ClimaticEffect {
            celestial: QiPhase::MildYangMetal,
            terrestrial: QiPhase::MildYinFire,
        },
    ),
    (
        (Branch::Chen, Branch::Xu),
        ClimaticEffect {
            celestial: QiPhase::DominantYangWater,
            terrestrial: QiPhase::DominantYinEarth,
        },
    ),
    (
        (Branch::Si, Branch::Hai),
        ClimaticEffect {
            celestial: QiPhase::WeakYinWood,
            terrestrial: QiPhase::WeakYangFire,
        },
    ),
];

/// 查找地支所属配对; 表是全覆盖的, None 只可能来自表被改坏
pub fn lookup_pairing(branch: Branch) -> Option<ClimaticEffect> {
    CLIMATIC_PAIRINGS
        .iter()
        .find(|((a, b), _)| *a == branch || *b == branch)
        .map(|(_, effect)| *effect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_branch_in_exactly_one_pair() {
        for branch in Branch::ALL {
            let hits = CLIMATIC_PAIRINGS
                .iter()
                .filter(|((a, b), _)| *a == branch || *b == branch)
                .count();
            assert_eq!(hits, 1, "地支 {} 应且仅应属于一个配对", branch);
        }
    }

    #[test]
    fn test_zi_wu_pairing() {
        let expected = ClimaticEffect {
            celestial: QiPhase::MildYinFire,
            terrestrial: QiPhase::MildYangMetal,
        };
        assert_eq!(lookup_pairing(Branch::Zi), Some(expected));
        assert_eq!(lookup_pairing(Branch::Wu), Some(expected));
    }

    #[test]
    fn test_si_hai_pairing() {
        let effect = lookup_pairing(Branch::Hai).unwrap();
        assert_eq!(effect.celestial, QiPhase::WeakYinWood);
        assert_eq!(effect.terrestrial, QiPhase::WeakYangFire);
    }
}
