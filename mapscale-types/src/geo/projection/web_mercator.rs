use std::marker::PhantomData;

use crate::cartesian::NewCartesianPoint2d;
use crate::geo::datum::Datum;
use crate::geo::point::NewGeoPoint;
use crate::geo::projection::Projection;

/// Spherical Web Mercator projection (EPSG:3857). Projected coordinates are in meters on the
/// equator.
#[derive(Debug, Copy, Clone)]
pub struct WebMercator<In, Out> {
    datum: Datum,
    phantom_in: PhantomData<In>,
    phantom_out: PhantomData<Out>,
}

impl<In, Out> WebMercator<In, Out> {
    /// Creates a projection for the given datum.
    pub fn new(datum: Datum) -> Self {
        Self {
            datum,
            phantom_in: Default::default(),
            phantom_out: Default::default(),
        }
    }
}

impl<In, Out> Default for WebMercator<In, Out> {
    fn default() -> Self {
        Self::new(Datum::WGS84)
    }
}

impl<In: NewGeoPoint<f64>, Out: NewCartesianPoint2d<f64>> Projection for WebMercator<In, Out> {
    type InPoint = In;
    type OutPoint = Out;

    fn project(&self, input: &Self::InPoint) -> Option<Self::OutPoint> {
        if input.lat().abs() >= 90.0 {
            return None;
        }

        let x = self.datum.semimajor() * input.lon_rad();
        let y = self.datum.semimajor()
            * (std::f64::consts::FRAC_PI_4 + input.lat_rad() / 2.0)
                .tan()
                .ln();

        if x.is_finite() && y.is_finite() {
            Some(Out::new(x, y))
        } else {
            None
        }
    }

    fn unproject(&self, input: &Self::OutPoint) -> Option<Self::InPoint> {
        let x = input.x();
        let y = input.y();
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        let lat = 2.0 * (y / self.datum.semimajor()).exp().atan() - std::f64::consts::FRAC_PI_2;
        let lon = x / self.datum.semimajor();

        Some(In::latlon(lat.to_degrees(), lon.to_degrees()))
    }
}
