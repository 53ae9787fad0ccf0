//! Versioned constant tables consumed by the field extractors
//!
//! Each table is named data rather than a literal buried in a regex, so a
//! heuristic can be tested or swapped without touching control flow. Bump
//! [`TABLE_VERSION`] whenever a table changes. Records do not carry the
//! version they were extracted under; reconciliation reports the version it
//! ran with.

/// Version of the extraction tables
pub const TABLE_VERSION: u32 = 4;

/// Chinese numeral characters accepted in article markers
pub const CHINESE_NUMERALS: &str = "一二三四五六七八九十百千万";

/// Marker units, in the order they appear in the marker character class
pub const MARKER_UNITS: &str = "条章节款项";

/// Suffixes a valid court / tribunal name must end with
pub const COURT_SUFFIXES: &[&str] = &["人民法院", "仲裁委员会"];

/// Leading words that mark a candidate as a sentence fragment
pub const COURT_STOP_PREFIXES: &[&str] = &[
    "向", "至", "在", "由", "被", "简称", "申请", "诉", "不服", "经", "本案", "一案",
];

/// Common surnames; a candidate starting with one is usually a party name
pub const COMMON_SURNAMES: &str = "张李王刘陈杨黄赵吴周徐孙马朱胡郭何高林罗郑梁谢宋唐许韩冯邓曹彭曾肖田董袁潘于蒋蔡余杜叶程苏魏吕丁任沈姚卢姜崔钟谭陆汪范金石廖贾夏韦付方白邹孟熊秦邱江尹薛闫段雷侯龙史陶黎贺顾毛郝龚邵万钱严覃武戴莫孔向汤";

/// Province-level and prefecture-level place names, short form
///
/// A court candidate is anchored at the last of these it contains, and one
/// starting with a place is never taken for a party name.
pub const PLACE_NAMES: &[&str] = &[
    "北京", "天津", "上海", "重庆", "河北", "山西", "辽宁", "吉林", "黑龙江", "江苏",
    "浙江", "安徽", "福建", "江西", "山东", "河南", "湖北", "湖南", "广东", "海南",
    "四川", "贵州", "云南", "陕西", "甘肃", "青海", "台湾", "内蒙古", "广西", "西藏",
    "宁夏", "新疆", "香港", "澳门",
    "石家庄", "唐山", "秦皇岛", "邯郸", "邢台", "保定", "张家口", "承德", "沧州", "廊坊",
    "衡水", "太原", "大同", "阳泉", "长治", "晋城", "朔州", "晋中", "运城", "忻州",
    "临汾", "吕梁", "呼和浩特", "包头", "乌海", "赤峰", "通辽", "鄂尔多斯", "呼伦贝尔",
    "沈阳", "大连", "鞍山", "抚顺", "本溪", "丹东", "锦州", "营口", "阜新", "辽阳",
    "盘锦", "铁岭", "朝阳", "葫芦岛", "长春", "四平", "辽源", "通化", "白山", "松原",
    "白城", "延边", "哈尔滨", "齐齐哈尔", "鸡西", "鹤岗", "双鸭山", "大庆", "伊春",
    "佳木斯", "七台河", "牡丹江", "绥化", "南京", "无锡", "徐州", "常州", "苏州", "南通",
    "连云港", "淮安", "盐城", "扬州", "镇江", "泰州", "宿迁", "杭州", "宁波", "温州",
    "嘉兴", "湖州", "绍兴", "金华", "衢州", "舟山", "台州", "丽水", "合肥", "芜湖",
    "蚌埠", "淮南", "马鞍山", "淮北", "铜陵", "安庆", "黄山", "滁州", "阜阳", "宿州",
    "六安", "亳州", "池州", "宣城", "福州", "厦门", "莆田", "三明", "泉州", "漳州",
    "南平", "龙岩", "宁德", "南昌", "景德镇", "萍乡", "九江", "新余", "鹰潭", "赣州",
    "吉安", "宜春", "抚州", "上饶", "济南", "青岛", "淄博", "枣庄", "东营", "烟台",
    "潍坊", "济宁", "泰安", "威海", "日照", "临沂", "德州", "聊城", "滨州", "菏泽",
    "郑州", "开封", "洛阳", "平顶山", "安阳", "鹤壁", "新乡", "焦作", "濮阳", "许昌",
    "漯河", "三门峡", "南阳", "商丘", "信阳", "周口", "驻马店", "武汉", "黄石", "十堰",
    "宜昌", "襄阳", "鄂州", "荆门", "孝感", "荆州", "黄冈", "咸宁", "随州", "恩施",
    "长沙", "株洲", "湘潭", "衡阳", "邵阳", "岳阳", "常德", "张家界", "益阳", "郴州",
    "永州", "怀化", "娄底", "湘西", "广州", "韶关", "深圳", "珠海", "汕头", "佛山",
    "江门", "湛江", "茂名", "肇庆", "惠州", "梅州", "汕尾", "河源", "阳江", "清远",
    "东莞", "中山", "潮州", "揭阳", "云浮", "南宁", "柳州", "桂林", "梧州", "北海",
    "防城港", "钦州", "贵港", "玉林", "百色", "贺州", "河池", "崇左", "海口", "三亚",
    "儋州", "成都", "自贡", "攀枝花", "泸州", "德阳", "绵阳", "广元", "遂宁", "内江",
    "乐山", "南充", "眉山", "宜宾", "广安", "达州", "雅安", "巴中", "资阳", "贵阳",
    "六盘水", "遵义", "安顺", "毕节", "铜仁", "昆明", "曲靖", "玉溪", "保山", "昭通",
    "丽江", "普洱", "临沧", "大理", "拉萨", "日喀则", "西安", "铜川", "宝鸡", "咸阳",
    "渭南", "延安", "汉中", "榆林", "商洛", "兰州", "嘉峪关", "金昌", "白银", "天水",
    "武威", "张掖", "平凉", "酒泉", "庆阳", "定西", "陇南", "西宁", "银川", "石嘴山",
    "吴忠", "固原", "中卫", "乌鲁木齐", "克拉玛依", "吐鲁番", "哈密",
    "张家港", "江阴", "常熟", "昆山", "余姚", "义乌", "晋江", "石狮", "高邮", "万州", "宋庄",
];

/// Level words that join a place to the next name down, as in 江苏省南京市
pub const PLACE_LEVELS: &[&str] = &[
    "省", "市", "自治区", "壮族自治区", "回族自治区", "维吾尔自治区", "特别行政区", "自治州",
];

/// Substrings that never occur in a real court name
pub const COURT_DENYLIST: &[&str] = &[
    "诉至", "不服", "《", "》", "规定", "作为", "应予", "支持", "作出", "撤销", "维持",
    "判决", "裁定", "号", "简称", "案",
];

/// Bracket characters, full and half width
pub const BRACKETS: &[char] = &['(', ')', '（', '）', '[', ']', '【', '】', '〔', '〕'];

/// Connector tokens; a candidate is cut after the last one it contains
pub const COURT_CONNECTORS: &[&str] = &[
    "不服", "诉至", "由", "向", "至", "在", "被", "诉", "系", "将", "到", "的", "是", "为",
    "：", ":", "、", " ",
];

/// Administrative-region tokens; candidates containing one are preferred
pub const REGION_TOKENS: &[&str] = &["省", "市", "区", "县", "自治区", "特别行政区"];

/// Section headers introducing the dispute point, in priority order
pub const DISPUTE_HEADERS: &[&str] = &["争议焦点", "核心争议", "本案争议", "主要争议", "争议点"];

/// Section headers introducing the judgment result, in priority order
pub const RESULT_HEADERS: &[&str] = &["裁判结果", "判决结果", "处理结果"];

/// Prefixes that mark captured text as a legal citation rather than a summary
pub const CITATION_PREFIXES: &[&str] = &["《", "根据", "按照"];

/// Labels preceding a publishing organisation
pub const PUBLISH_ORG_LABELS: &[&str] = &[
    "发布机关", "发布机构", "制定机关", "制定机构", "颁布机关", "颁布机构",
];

/// Labels preceding a publish / effective date, in priority order
pub const PUBLISH_DATE_LABELS: &[&str] = &[
    "发布日期", "发布时间", "颁布日期", "颁布时间", "施行日期", "施行时间",
];

/// Labels preceding a judgment date
pub const JUDGMENT_DATE_LABELS: &[&str] = &["判决日期", "裁判日期", "裁决日期"];

/// Labels preceding a cause of action
pub const CAUSE_LABELS: &[&str] = &["案由", "案件类型"];

/// Title keywords that end a cause of action
pub const CAUSE_TITLE_KEYWORDS: &[&str] = &["纠纷", "争议"];

/// Accepted year range for extracted dates
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2030;

/// Accepted character range for a court name
pub const COURT_NAME_CHARS: std::ops::RangeInclusive<usize> = 5..=50;

/// Accepted character range for dispute point and judgment result
pub const SUMMARY_CHARS: std::ops::RangeInclusive<usize> = 20..=500;

/// Maximum characters for a cause of action taken from a label
pub const MAX_CAUSE_CHARS: usize = 100;

/// Maximum characters for a publishing organisation
pub const MAX_ORG_CHARS: usize = 50;
