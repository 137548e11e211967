use std::net::IpAddr;

use colored::*;
use hostscope_common::network::range::AddressRange;

use crate::terminal::colors;

pub fn ip_to_detail(ip: &IpAddr) -> (String, ColoredString) {
    match ip {
        IpAddr::V4(ipv4_addr) => (
            String::from("IPv4"),
            ipv4_addr.to_string().color(colors::IPV4_ADDR),
        ),
        IpAddr::V6(ipv6_addr) => (
            String::from("IPv6"),
            ipv6_addr.to_string().color(colors::IPV6_ADDR),
        ),
    }
}

pub fn range_to_detail(range: &AddressRange) -> (String, ColoredString) {
    let color = match range.low {
        IpAddr::V4(_) => colors::IPV4_ADDR,
        IpAddr::V6(_) => colors::IPV6_ADDR,
    };
    let unit: &str = if range.len() == 1 { "address" } else { "addresses" };
    let value: String = format!("{} ({} {unit})", range, range.len());
    (String::from("Range"), value.color(color))
}

pub fn count_to_string(count: u128) -> ColoredString {
    count.to_string().bold().green()
}

pub fn validity(valid: bool) -> ColoredString {
    if valid {
        "valid".color(colors::VALID).bold()
    } else {
        "invalid".color(colors::INVALID).bold()
    }
}
