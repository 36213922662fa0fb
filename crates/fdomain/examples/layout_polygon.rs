//! Lay out the fundamental domain of a kaleidoscopic k-gon and print its
//! boundary corners.
//!
//! Usage: `cargo run -p fdomain --example layout_polygon -- [k] [m12]`

use fdomain::api::{DSymbol, FdCfg, FundamentalDomain};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let k: usize = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5);
    let m12: u32 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(4);

    let sym = DSymbol::reflection_polygon(k, m12);
    let fd = FundamentalDomain::build(&sym, &FdCfg::default())?;
    let s = fd.summary();
    println!("symbol={sym}");
    println!(
        "geometry={} radius={:.6} chi={} boundary={}",
        s.geometry.name(),
        s.radius,
        s.chi,
        s.boundary
    );
    for corner in fd.coords.boundary_corners() {
        let orbit = fd.graph.orbit(corner.orbit);
        println!(
            "kind={} I={} dist={:.6} angle={:.6} x={:.6} y={:.6}",
            orbit.kind,
            orbit.stab,
            corner.at.polar.dist,
            corner.at.polar.angle,
            corner.at.pos.x,
            corner.at.pos.y
        );
    }
    Ok(())
}
