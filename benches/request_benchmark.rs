use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use parcel_shipping::entity::{
    Address, Package, PackageWeight, PackagingType, PaymentInformation, ReferenceNumber, Service,
    ShipTo, Shipment, Shipper, UnitOfMeasurement,
};
use parcel_shipping::{RequestBuilder, RequestOption, XmlNode};

fn shipment(packages: usize) -> Shipment {
    let address = Address::new()
        .with_address_line("12 Main St")
        .and_then(|a| a.with_city("Atlanta"))
        .and_then(|a| a.with_postal_code("30301"))
        .and_then(|a| a.with_country_code("US"))
        .unwrap();
    let mut shipment = Shipment::new(
        Shipper::new("ACME Corp", "A1B2C3").unwrap().with_address(address.clone()),
        ShipTo::new("Receiver Inc").unwrap().with_address(address),
        Service::new(Service::GROUND),
    )
    .with_payment(PaymentInformation::prepaid_account("A1B2C3"));

    for i in 0..packages {
        let package = Package::new()
            .with_packaging_type(PackagingType::new(PackagingType::CUSTOMER_SUPPLIED))
            .with_weight(PackageWeight::new(UnitOfMeasurement::new("LBS"), 1.5 + i as f64).unwrap())
            .with_reference_number(ReferenceNumber::new(format!("PKG-{}", i)).unwrap())
            .unwrap();
        shipment = shipment.with_package(package);
    }
    shipment
}

// Benchmark rendering confirm requests of growing size
pub fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("confirm_request_render");
    let builder = RequestBuilder::new(Some("bench".to_string()));

    for packages in [1, 10, 50].iter() {
        let shipment = shipment(*packages);
        group.bench_with_input(BenchmarkId::from_parameter(packages), &shipment, |b, shipment| {
            b.iter(|| {
                let request = builder
                    .confirm(black_box(shipment), RequestOption::NonValidate, None, None)
                    .unwrap();
                black_box(request.to_xml_string().unwrap())
            })
        });
    }
    group.finish();
}

// Benchmark parsing a reply and converting it to a generic value
pub fn parse_benchmark(c: &mut Criterion) {
    let reply = {
        let mut root = XmlNode::new("ShipmentAcceptResponse");
        let mut response = XmlNode::new("Response");
        response.push_text("ResponseStatusCode", "1");
        root.push(response).push_node(&shipment(20));
        root.to_xml_string().unwrap()
    };

    c.bench_function("reply_parse_to_value", |b| {
        b.iter(|| {
            let node = XmlNode::parse(black_box(&reply)).unwrap();
            black_box(node.to_value())
        })
    });
}

criterion_group!(benches, render_benchmark, parse_benchmark);
criterion_main!(benches);
