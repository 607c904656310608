//! 站点设备初始数据
//!
//! 持久化集合为空时写入。集合中只有一台设备处于 critical 状态。

use crate::models::{Alert, Criticality, Equipment, EquipmentStatus, EquipmentType};

struct Base {
    id: &'static str,
    name: &'static str,
    kind: EquipmentType,
    location: &'static str,
    zone: &'static str,
    status: EquipmentStatus,
    last: &'static str,
    next: &'static str,
    category: &'static str,
}

fn build(base: Base) -> Equipment {
    Equipment {
        id: base.id.to_string(),
        name: base.name.to_string(),
        kind: base.kind,
        location: base.location.to_string(),
        zone: base.zone.to_string(),
        status: base.status,
        alerts: Vec::new(),
        last_maintenance: base.last.to_string(),
        next_maintenance: base.next.to_string(),
        temperature: None,
        target_temp: None,
        category: Some(base.category.to_string()),
        criticality: None,
        maintenance_mode: None,
        service_frequency: None,
        replacement_cycle: None,
        compliance: None,
        kpis: None,
    }
}

fn with_alerts(mut eq: Equipment, alerts: Vec<Alert>) -> Equipment {
    eq.alerts = alerts;
    eq
}

fn with_temps(mut eq: Equipment, temperature: f64, target: f64) -> Equipment {
    eq.temperature = Some(temperature);
    eq.target_temp = Some(target);
    eq
}

fn with_criticality(mut eq: Equipment, criticality: Criticality) -> Equipment {
    eq.criticality = Some(criticality);
    eq
}

/// 初始设备集合
///
/// 每条记录保持单行，便于对照资产清单。
#[rustfmt::skip]
pub fn seed_equipment() -> Vec<Equipment> {
    use EquipmentStatus::{Offline, Operational, Warning};
    use EquipmentType as T;

    vec![
        // 建筑
        build(Base { id: "store-main", name: "Main Convenience Store", kind: T::Building, location: "Main Facility", zone: "Convenience Store", status: Operational, last: "2024-01-01", next: "2024-07-01", category: "buildings" }),
        build(Base { id: "carwash-building", name: "Automated Car Wash", kind: T::Building, location: "West Side", zone: "Car Wash", status: Operational, last: "2024-01-15", next: "2024-07-15", category: "buildings" }),
        build(Base { id: "storage-building", name: "Storage Building", kind: T::Building, location: "South Side", zone: "Storage", status: Operational, last: "2024-01-10", next: "2024-07-10", category: "buildings" }),
        build(Base { id: "forecourt-canopy", name: "Fuel Forecourt Canopy", kind: T::Structure, location: "Fuel Forecourt", zone: "Fuel Station", status: Operational, last: "2023-12-15", next: "2024-06-15", category: "infrastructure" }),
        // 暖通
        with_criticality(
            with_temps(
                with_alerts(
                    build(Base { id: "hvac-store", name: "Store HVAC Unit 15 Ton", kind: T::Hvac, location: "Convenience Store Roof", zone: "Convenience Store", status: EquipmentStatus::Critical, last: "2024-01-15", next: "2024-04-15", category: "energy" }),
                    vec![
                        Alert::critical("Compressor failure - temperature rising"),
                        Alert::critical("Refrigerant leak suspected"),
                    ],
                ),
                28.5,
                22.0,
            ),
            Criticality::T1,
        ),
        with_temps(
            build(Base { id: "hvac-carwash", name: "Car Wash HVAC 8 Ton", kind: T::Hvac, location: "Car Wash Building", zone: "Car Wash", status: Operational, last: "2024-01-20", next: "2024-04-20", category: "energy" }),
            20.8,
            21.0,
        ),
        // 加油
        build(Base { id: "pump-1a", name: "Diesel Pump 1A", kind: T::FuelPump, location: "Fuel Forecourt - Island 1", zone: "Fuel Station", status: Operational, last: "2024-02-01", next: "2024-05-01", category: "fuel" }),
        build(Base { id: "pump-1b", name: "Unleaded Pump 1B", kind: T::FuelPump, location: "Fuel Forecourt - Island 1", zone: "Fuel Station", status: Operational, last: "2024-02-01", next: "2024-05-01", category: "fuel" }),
        with_alerts(
            build(Base { id: "pump-2b", name: "Premium Pump 2B", kind: T::FuelPump, location: "Fuel Forecourt - Island 2", zone: "Fuel Station", status: Warning, last: "2024-01-10", next: "2024-04-10", category: "fuel" }),
            vec![Alert::warning("Card reader intermittent")],
        ),
        with_alerts(
            build(Base { id: "fuel-tank-diesel", name: "Diesel Storage Tank 20,000L", kind: T::FuelTank, location: "Underground - North", zone: "Fuel Station", status: Warning, last: "2024-01-05", next: "2024-07-05", category: "fuel" }),
            vec![Alert::warning("Fuel level below 25%")],
        ),
        build(Base { id: "fuel-tank-regular", name: "Unleaded Storage Tank 30,000L", kind: T::FuelTank, location: "Underground - North", zone: "Fuel Station", status: Operational, last: "2024-01-05", next: "2024-07-05", category: "fuel" }),
        // 充电
        build(Base { id: "ev-level2-1", name: "EV Charger Bay 1", kind: T::EvCharger, location: "EV Charging Bay", zone: "EV Charging", status: Operational, last: "2024-02-10", next: "2024-05-10", category: "ev-charging" }),
        with_alerts(
            build(Base { id: "ev-level2-3", name: "EV Charger Bay 3", kind: T::EvCharger, location: "EV Charging Bay", zone: "EV Charging", status: Offline, last: "2024-01-25", next: "2024-04-25", category: "ev-charging" }),
            vec![Alert::warning("Charger offline - network connectivity issue")],
        ),
        build(Base { id: "solar-panel-1", name: "Rooftop Solar Array", kind: T::SolarPanel, location: "Convenience Store Roof", zone: "Convenience Store", status: Operational, last: "2024-01-30", next: "2024-07-30", category: "energy" }),
        // 安防
        build(Base { id: "cctv-store", name: "Store CCTV System", kind: T::SecurityCamera, location: "Convenience Store Interior", zone: "Convenience Store", status: Operational, last: "2024-02-05", next: "2024-08-05", category: "security" }),
        with_alerts(
            build(Base { id: "cctv-carwash", name: "Car Wash Camera", kind: T::SecurityCamera, location: "Car Wash Entrance", zone: "Car Wash", status: Warning, last: "2023-12-20", next: "2024-03-20", category: "security" }),
            vec![Alert::warning("Lens obstruction detected")],
        ),
        with_alerts(
            build(Base { id: "fire-alarm-1", name: "Store Fire Alarm Panel", kind: T::FireAlarm, location: "Convenience Store Back Office", zone: "Convenience Store", status: Warning, last: "2024-01-12", next: "2024-04-12", category: "security" }),
            vec![Alert::warning("Battery backup test due")],
        ),
        build(Base { id: "emergency-shutoff", name: "Forecourt Emergency Shutoff", kind: T::EmergencySystem, location: "Fuel Forecourt Kiosk", zone: "Fuel Station", status: Operational, last: "2024-02-15", next: "2024-08-15", category: "security" }),
        // 服务
        build(Base { id: "vacuum-1", name: "Coin Vacuum Station", kind: T::Vacuum, location: "Car Wash Exit", zone: "Car Wash", status: Operational, last: "2024-01-18", next: "2024-04-18", category: "service" }),
        build(Base { id: "atm", name: "ATM Machine", kind: T::Atm, location: "Store Entrance", zone: "Convenience Store", status: Operational, last: "2024-02-20", next: "2024-05-20", category: "service" }),
        // 餐饮
        build(Base { id: "coffee-machine-1", name: "Bean-to-Cup Coffee Machine", kind: T::CoffeeMachine, location: "Coffee Station", zone: "Convenience Store", status: Operational, last: "2024-02-01", next: "2024-03-01", category: "food-service" }),
        with_temps(
            build(Base { id: "hot-food-1", name: "Hot Food Cabinet", kind: T::HotFoodCabinet, location: "Food To Go Counter", zone: "Convenience Store", status: Operational, last: "2024-02-03", next: "2024-05-03", category: "food-service" }),
            68.0,
            70.0,
        ),
        // 冷藏
        with_temps(
            with_alerts(
                build(Base { id: "fridge-dairy", name: "Dairy Display Chiller", kind: T::Refrigerator, location: "Aisle 3", zone: "Convenience Store", status: Warning, last: "2024-01-22", next: "2024-04-22", category: "refrigeration" }),
                vec![
                    Alert::warning("Temperature above target"),
                    Alert::warning("Door seal needs inspection"),
                ],
            ),
            5.8,
            4.0,
        ),
        with_temps(
            build(Base { id: "freezer-1", name: "Ice Cream Freezer", kind: T::Freezer, location: "Aisle 4", zone: "Convenience Store", status: Operational, last: "2024-01-28", next: "2024-04-28", category: "refrigeration" }),
            -18.5,
            -18.0,
        ),
        // 洗车
        build(Base { id: "carwash-system", name: "Soft-Touch Wash System", kind: T::CarWash, location: "Car Wash Bay", zone: "Car Wash", status: Operational, last: "2024-02-08", next: "2024-05-08", category: "car-wash" }),
        build(Base { id: "water-recycler-1", name: "Wash Water Reclaim Unit", kind: T::WaterRecycler, location: "Car Wash Plant Room", zone: "Car Wash", status: Operational, last: "2024-02-08", next: "2024-05-08", category: "car-wash" }),
    ]
}
