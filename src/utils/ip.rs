//! IP 地址规范化
//!
//! 查询参数和数据集中的地址都先经过这里，得到统一的 key：
//! - 去除首尾空白
//! - 只接受合法的 IPv4 / IPv6 字面量（IPv4 不允许前导零）
//! - IPv6 按 RFC 5952 输出压缩形式，IPv4-mapped 地址折叠为 IPv4

use std::net::IpAddr;

/// Parse `raw` into an address value, ignoring surrounding whitespace.
pub fn parse_ip(raw: &str) -> Option<IpAddr> {
    raw.trim()
        .parse::<IpAddr>()
        .ok()
        .map(|ip| ip.to_canonical())
}

/// Canonical textual form of `raw`, or `None` when it is not an IP address.
///
/// Two spellings of the same address (`2001:DB8:0:0::1` and `2001:db8::1`)
/// normalize to the same string, and normalizing a canonical string returns
/// it unchanged.
pub fn normalize_ip(raw: &str) -> Option<String> {
    parse_ip(raw).map(|ip| ip.to_string())
}

#[inline]
pub fn is_valid_ip(raw: &str) -> bool {
    parse_ip(raw).is_some()
}
