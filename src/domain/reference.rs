//! Static informational copy: disclaimer, test methodology, glossary, about page.

/// A titled block of text inside an informational screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoSection {
    pub title: &'static str,
    pub body: &'static str,
}

pub const DISCLAIMER_TITLE: &str = "면책 조항";

pub const DISCLAIMER: &str = "본 웹사이트의 정보는 직접적인 진단 목적 또는 유전학 전문가의 검토 없는 \
의료적 의사 결정에 사용되지 않습니다. 본 검사는 모든 유전적 발견을 보고하지 않습니다. 개인은 본 \
웹사이트에 포함된 정보만을 근거로 건강 행동을 변경해서는 안 됩니다. 본 웹사이트의 정보에 대해 궁금한 \
점이 있으면 의료 전문가에게 문의하시기 바랍니다.";

pub const ABOUT_TEST_TITLE: &str = "검사 정보";

pub const ABOUT_TEST: &[InfoSection] = &[
    InfoSection {
        title: "검사 개요 (ABOUT THIS TEST)",
        body: "전장 엑솜 시퀀싱(WES)은 Illumina NovaSeq-6000 플랫폼에서 차세대 시퀀싱(NGS) 기술로 \
수행되며, 엑솜 영역에서 최소 50배의 평균 커버리지로 시퀀싱됩니다. 150bp 페어드-엔드 리드는 BWA로 \
GRCh38 참조 시퀀스에 정렬되고, 변이 호출은 GATK 모범 사례 워크플로우를 따릅니다. 유전자 변이는 \
ClinVar 및 전문가 큐레이션 목록을 활용하여 라벨링됩니다. 보인자 빈도가 200명 중 1명 이상인 질환에 \
대해 ACMG 권장 Tier-3 보인자 스크리닝(113개 유전자)을 제공합니다.",
    },
    InfoSection {
        title: "제한 사항 (LIMITATIONS)",
        body: "모든 변이가 식별되지는 않습니다. 본 검사는 반복 확장, 전위, 대규모 복사수 변이, 단일 엑손 \
결실/중복, 미토콘드리아 변이 및 비코딩 변이를 감지하지 못합니다. 변이의 임상적 해석은 시간이 지남에 \
따라 변경될 수 있습니다. 본 검사는 FDA의 승인 또는 허가를 받지 않았습니다.",
    },
    InfoSection {
        title: "변이 분류 정의",
        body: "P: 병원성 (Pathogenic) - 질병을 유발하는 것으로 알려진 변이입니다.\n\
LP: 병원성 가능성 (Likely Pathogenic) - 질병을 유발할 가능성이 매우 높은 변이입니다.\n\
VUS: 불확실한 유의성 변이 - 임상적 의미가 아직 불확실한 변이입니다.\n\
LB: 양성 가능성 (Likely Benign) - 질병을 유발하지 않을 가능성이 높은 변이입니다.\n\
B: 양성 (Benign) - 질병을 유발하지 않는 것으로 알려진 변이입니다.",
    },
    InfoSection {
        title: "등급 정의",
        body: "ACTIONABLE: ACMG가 큐레이션한 매우 강력한 유전자-질병 연관성 변이로 의학적 개입이 가능합니다.\n\
SIGNIFICANT: ClinGen 및 MedSeq가 큐레이션한 강력한 연관성 변이로 ClinVar 3개 이상 별 평가를 받았습니다.\n\
NOTABLE: 의료 또는 가족력과 관련된 변이입니다.\n\
EXPLORATORY: 나머지 모든 변이 (제한된 큐레이션, ClinVar 0/1개 별 평가).",
    },
];

pub const RARE_DISORDER_TITLE: &str = "희귀 유전 질환 정보";

pub const RARE_DISORDER: &[InfoSection] = &[
    InfoSection {
        title: "희귀 유전 질환",
        body: "희귀 유전 질환은 한 개 또는 여러 유전자 이상으로 인해 유전되는 질환으로, 일반적으로 \
200,000명 중 1명 미만에게 영향을 미칩니다.",
    },
    InfoSection {
        title: "보인자 스크리닝 (CARRIER SCREENING)",
        body: "일부 질환은 열성이며, 발병하려면 유전자의 두 복사본 모두에 변이가 필요합니다. 한 복사본에만 \
변이를 가진 사람을 '보인자'라고 하며, 대개 증상이 없거나 경미합니다.",
    },
    InfoSection {
        title: "등급 정의",
        body: "ACTIONABLE: 유전 검사 결과에 기반한 의학적 개입이 가능한 질환 (ACMG 73개 유전자).\n\
SIGNIFICANT: 전문가 패널 검토를 거친 강력한 유전자-질병 연관성 변이.\n\
NOTABLE: ClinVar에 충돌이 없고 Varsome 3개 별 평가를 받은 변이.",
    },
];

pub const ABOUT_TITLE: &str = "프리딕티브 AI";
pub const ABOUT_TAGLINE: &str = "당신의 건강한 삶을 위한 디지털 동반자";

pub const ABOUT: &[InfoSection] = &[
    InfoSection {
        title: "우리의 비전",
        body: "유전체(Genome)와 생활 습관(Nurture)의 데이터를 통합하여 모든 사람이 더 오래 건강한 삶을 \
누리도록 돕습니다. 혁신적인 헬스케어를 누구나 쉽게 접근하고 이해할 수 있게 하는 것이 목표입니다.",
    },
    InfoSection {
        title: "핵심 가치: 사전 예방적 건강 관리",
        body: "데이터 기반 건강 예측으로 질병을 예방하고 조기에 관리합니다. DNA 기반 휴먼 디지털 트윈 \
플랫폼이 개인 맞춤형 유전 건강 정보와 생활 습관 정보를 제공합니다.",
    },
    InfoSection {
        title: "기술과 혁신",
        body: "유전체 분석, 인공지능, 머신러닝을 결합해 '5P Medicine'(개인화, 예측, 예방, 참여, 정밀) \
철학에 따른 건강 관리 경험을 제공합니다.",
    },
    InfoSection {
        title: "문의",
        body: "공식 웹사이트: https://aipredictive.com/\n이메일: aipredictive@aipredictive.com",
    },
];
